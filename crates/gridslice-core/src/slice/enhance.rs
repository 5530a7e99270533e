//! Local enhancers for hosts without a remote enhancement service.

use crate::decode::{scale_to_fit, DecodedImage, FilterType};

use super::{EnhanceError, EnhanceTile, EnhancedTile};

/// Returns every tile unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEnhancer;

impl EnhanceTile for PassthroughEnhancer {
    fn enhance(&mut self, tile: &DecodedImage, _mime_type: &str) -> Result<EnhancedTile, EnhanceError> {
        Ok(tile.clone().into())
    }
}

/// Upscales tiles by an integer factor with Lanczos3 resampling.
///
/// Output is capped at `max_edge` on its longest side; tiles already that
/// large are returned unchanged.
#[derive(Debug, Clone, Copy)]
pub struct UpscaleEnhancer {
    pub factor: u32,
    pub max_edge: u32,
    pub filter: FilterType,
}

impl Default for UpscaleEnhancer {
    fn default() -> Self {
        Self {
            factor: 2,
            max_edge: 4096,
            filter: FilterType::Lanczos3,
        }
    }
}

impl EnhanceTile for UpscaleEnhancer {
    fn enhance(&mut self, tile: &DecodedImage, _mime_type: &str) -> Result<EnhancedTile, EnhanceError> {
        scale_to_fit(tile, self.factor, self.max_edge, self.filter)
            .map(EnhancedTile::from)
            .map_err(|e| EnhanceError::InvalidOutput(e.to_string()))
    }
}
