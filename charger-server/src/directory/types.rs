//! OpenChargeMap POI response DTOs.
//!
//! These map directly to the `/poi` JSON output. Field names are the API's
//! PascalCase, and everything is optional because the API omits fields
//! freely, even coordinates.

use serde::{Deserialize, Serialize};

/// One point of interest (a charging site).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PoiRecord {
    #[serde(rename = "ID")]
    pub id: Option<i64>,

    #[serde(rename = "UUID")]
    pub uuid: Option<String>,

    pub data_provider: Option<DataProvider>,

    pub operator_info: Option<PoiOperator>,

    /// Site status; its `ID` drives availability.
    pub status_type: Option<StatusType>,

    pub address_info: Option<AddressInfo>,

    pub connections: Option<Vec<Connection>>,

    pub general_comments: Option<String>,

    /// ISO 8601 timestamp of the last status change.
    pub date_last_status_update: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataProvider {
    pub title: Option<String>,
    #[serde(rename = "ID")]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PoiOperator {
    pub title: Option<String>,
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    pub phone_primary_contact: Option<String>,
    pub contact_email: Option<String>,
    #[serde(rename = "WebsiteURL")]
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusType {
    pub is_operational: Option<bool>,
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressInfo {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub town: Option<String>,
    pub state_or_province: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<Country>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub access_comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    #[serde(rename = "ISOCode")]
    pub iso_code: Option<String>,
    pub title: Option<String>,
}

/// A single connector group at a site.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Connection {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    pub connection_type: Option<ConnectionType>,
    pub reference: Option<String>,
    pub status_type: Option<StatusType>,
    pub level: Option<Level>,
    #[serde(rename = "PowerKW")]
    pub power_kw: Option<f64>,
    pub current_type: Option<CurrentType>,
    pub quantity: Option<i64>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionType {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub formal_name: Option<String>,
    pub is_discontinued: Option<bool>,
    pub is_obsolete: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Level {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub comments: Option<String>,
    pub is_fast_charge_capable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentType {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
}
