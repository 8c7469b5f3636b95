use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProductType {
    /// Older catalog responses spell this `DATAUNION`
    #[serde(rename = "DATA_UNION", alias = "DATAUNION")]
    DataUnion,

    #[serde(rename = "NORMAL")]
    Normal,

    #[default]
    #[serde(rename = "OTHER", other)]
    Other,
}

/// A public catalog entry owning zero or more streams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type", default)]
    pub product_type: ProductType,

    /// Absent flags count as not free
    #[serde(default)]
    pub is_free: bool,

    #[serde(default)]
    pub inactivity_threshold_hours: Option<f64>,
}

impl Product {
    pub fn new(id: impl Into<String>, product_type: ProductType, is_free: bool) -> Self {
        Self {
            id: id.into(),
            name: None,
            product_type,
            is_free,
            inactivity_threshold_hours: None,
        }
    }

    pub fn is_data_union(&self) -> bool {
        self.product_type == ProductType::DataUnion
    }

    pub fn is_normal(&self) -> bool {
        self.product_type == ProductType::Normal
    }

    pub fn description(&self) -> String {
        match &self.name {
            Some(name) => format!("Product '{}' ({})", name, self.id),
            None => format!("Product {}", self.id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub inactivity_threshold_hours: Option<f64>,
}

impl Stream {
    pub fn new(id: impl Into<String>, inactivity_threshold_hours: Option<f64>) -> Self {
        Self {
            id: id.into(),
            name: None,
            inactivity_threshold_hours,
        }
    }
}
