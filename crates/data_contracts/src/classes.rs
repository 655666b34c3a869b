use serde::{Deserialize, Serialize};

/// Ordered class-name registry. Index position is the class-index contract
/// shared between training-time manifests and inference-time decoding;
/// training and inference must use the same registry or class indices
/// silently misalign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRegistry {
    names: Vec<String>,
}

/// Result of decoding a raw class index against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassLabel {
    Known { index: usize, name: String },
    /// Index fell outside the registry; decodes to a placeholder name
    /// instead of failing.
    OutOfRange { index: usize },
}

impl ClassLabel {
    pub fn display_name(&self) -> String {
        match self {
            ClassLabel::Known { name, .. } => name.clone(),
            ClassLabel::OutOfRange { index } => format!("unknown_{index}"),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ClassLabel::OutOfRange { .. })
    }
}

impl ClassRegistry {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn from_names(names: &[&str]) -> Self {
        Self::new(names.iter().map(|n| n.to_string()).collect())
    }

    /// The firework classes the reference model is trained on.
    pub fn fireworks() -> Self {
        Self::from_names(&[
            "AllBlue",
            "Apocalypse",
            "Envy",
            "GlitteringBrocades",
            "HardCore",
            "LoudAndClear",
            "MasterBlaster",
            "MysticalSky",
            "Phantom",
            "RainbowCoconut",
            "ShortCircuit",
            "Snap",
            "StrobingCoconut",
            "ThunderingRainbow",
        ])
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn decode(&self, index: usize) -> ClassLabel {
        match self.names.get(index) {
            Some(name) => ClassLabel::Known {
                index,
                name: name.clone(),
            },
            None => ClassLabel::OutOfRange { index },
        }
    }
}
