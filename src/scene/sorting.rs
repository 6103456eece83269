use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A named sorting layer and its draw-order value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingLayer {
    /// Id stored on renderers and canvases.
    pub id: i32,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Draw-order value; higher draws later (on top).
    pub value: i32,
}

/// Resolves sorting-layer ids to their configured order values.
///
/// Unknown ids resolve to `0`, the value of the default layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SortingLayer>", into = "Vec<SortingLayer>")]
pub struct SortingLayers {
    layers: Vec<SortingLayer>,
    values: FxHashMap<i32, i32>,
}

impl SortingLayers {
    /// Build from a list of layers. Later duplicates of an id win.
    #[must_use]
    pub fn new(layers: Vec<SortingLayer>) -> Self {
        let values = layers.iter().map(|l| (l.id, l.value)).collect();
        Self { layers, values }
    }

    /// Order value for a layer id.
    #[must_use]
    pub fn value(&self, id: i32) -> i32 {
        self.values.get(&id).copied().unwrap_or(0)
    }

    /// Configured layers in declaration order.
    #[must_use]
    pub fn layers(&self) -> &[SortingLayer] {
        &self.layers
    }
}

impl From<Vec<SortingLayer>> for SortingLayers {
    fn from(layers: Vec<SortingLayer>) -> Self {
        Self::new(layers)
    }
}

impl From<SortingLayers> for Vec<SortingLayer> {
    fn from(layers: SortingLayers) -> Self {
        layers.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_resolve_to_default_value() {
        let layers = SortingLayers::new(vec![
            SortingLayer {
                id: 7,
                name: "Foreground".into(),
                value: 3,
            },
            SortingLayer {
                id: -2,
                name: "Background".into(),
                value: -1,
            },
        ]);
        assert_eq!(layers.value(7), 3);
        assert_eq!(layers.value(-2), -1);
        assert_eq!(layers.value(99), 0);
    }

    #[test]
    fn parses_from_toml_array() {
        #[derive(Deserialize)]
        struct Doc {
            sorting_layers: SortingLayers,
        }
        let doc: Doc = toml::from_str(
            r#"
[[sorting_layers]]
id = 4
name = "UI"
value = 10
"#,
        )
        .unwrap();
        assert_eq!(doc.sorting_layers.value(4), 10);
        assert_eq!(doc.sorting_layers.layers().len(), 1);
    }
}
