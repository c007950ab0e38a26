//! Collision Layers
//!
//! Scene geometry is sorted into up to 32 layers. Spatial queries take a
//! [`LayerMask`] selecting which layers they may hit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ground / floor geometry. Never counts as a blocking overlap.
pub const GROUND_LAYER: Layer = Layer(7);
/// Committed structures (hit by delete-mode rays).
pub const STRUCTURE_LAYER: Layer = Layer(8);
/// The candidate preview while it follows the aiming ray.
pub const PREVIEW_LAYER: Layer = Layer(9);

/// A single collision layer (0..=31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer(pub u8);

impl Layer {
    /// Mask containing only this layer. Layers above 31 map to an empty mask.
    pub fn mask(self) -> LayerMask {
        if self.0 < 32 {
            LayerMask(1 << self.0)
        } else {
            LayerMask::NONE
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {}", self.0)
    }
}

/// Bit set of layers a query is allowed to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn from_layers(layers: &[Layer]) -> Self {
        layers.iter().fold(Self::NONE, |mask, layer| mask.with(*layer))
    }

    /// Returns a copy of this mask with `layer` added.
    pub fn with(self, layer: Layer) -> Self {
        LayerMask(self.0 | layer.mask().0)
    }

    pub fn contains(self, layer: Layer) -> bool {
        let bit = layer.mask().0;
        bit != 0 && self.0 & bit == bit
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_membership() {
        let mask = LayerMask::from_layers(&[GROUND_LAYER, STRUCTURE_LAYER]);
        assert!(mask.contains(GROUND_LAYER));
        assert!(mask.contains(STRUCTURE_LAYER));
        assert!(!mask.contains(PREVIEW_LAYER));
        assert_eq!(mask.0, (1 << 7) | (1 << 8));
    }

    #[test]
    fn test_out_of_range_layer() {
        assert!(Layer(40).mask().is_empty());
        assert!(!LayerMask::ALL.contains(Layer(40)));
    }

    #[test]
    fn test_serde_transparent() {
        let mask: LayerMask = serde_json::from_str("384").unwrap();
        assert!(mask.contains(GROUND_LAYER));
        assert_eq!(serde_json::to_string(&Layer(7)).unwrap(), "7");
    }
}
