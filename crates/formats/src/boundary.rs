use serde_json::{Map, Value};

/// One administrative region of the boundary document.
///
/// The feature is kept as received so the map renderer gets back exactly the
/// geometry it would have read from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRegion {
    pub name: String,
    pub adcode: Option<String>,
    pub feature: Value,
}

impl BoundaryRegion {
    /// Builds a region with an empty geometry; mostly useful for tests and
    /// synthetic layers.
    pub fn new(name: impl Into<String>, adcode: Option<&str>) -> Self {
        let name = name.into();
        let mut properties = Map::new();
        properties.insert("name".to_string(), Value::String(name.clone()));
        if let Some(code) = adcode {
            properties.insert("adcode".to_string(), Value::String(code.to_string()));
        }
        let mut feature = Map::new();
        feature.insert("type".to_string(), Value::String("Feature".to_string()));
        feature.insert("properties".to_string(), Value::Object(properties));
        feature.insert("geometry".to_string(), Value::Null);
        Self {
            name,
            adcode: adcode.map(str::to_string),
            feature: Value::Object(feature),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundary {
    pub regions: Vec<BoundaryRegion>,
}

#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("boundary document is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("expected GeoJSON object with a features array")]
    MissingFeatures,
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

impl Boundary {
    pub fn from_geojson_str(payload: &str) -> Result<Self, BoundaryError> {
        let value: Value = serde_json::from_str(payload).map_err(BoundaryError::Json)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, BoundaryError> {
        let Value::Object(mut obj) = value else {
            return Err(BoundaryError::MissingFeatures);
        };
        let Some(Value::Array(features)) = obj.remove("features") else {
            return Err(BoundaryError::MissingFeatures);
        };

        let mut regions = Vec::with_capacity(features.len());
        for (index, feature) in features.into_iter().enumerate() {
            let feat_obj = feature
                .as_object()
                .ok_or(BoundaryError::InvalidFeature {
                    index,
                    reason: "feature must be an object".to_string(),
                })?;

            let properties = match feat_obj.get("properties") {
                None | Some(Value::Null) => None,
                Some(Value::Object(props)) => Some(props),
                Some(_) => {
                    return Err(BoundaryError::InvalidFeature {
                        index,
                        reason: "properties must be an object".to_string(),
                    });
                }
            };

            let name = properties
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();

            let adcode = match properties.and_then(|p| p.get("adcode")) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            regions.push(BoundaryRegion {
                name,
                adcode,
                feature,
            });
        }

        Ok(Self { regions })
    }

    /// Emits a GeoJSON FeatureCollection holding the kept features in order.
    pub fn to_geojson_value(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "type".to_string(),
            Value::String("FeatureCollection".to_string()),
        );
        root.insert(
            "features".to_string(),
            Value::Array(self.regions.iter().map(|r| r.feature.clone()).collect()),
        );
        Value::Object(root)
    }

    pub fn region_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.regions.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
