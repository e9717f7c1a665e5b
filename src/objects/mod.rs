//! Versioned decoders for every implemented entity type.
//!
//! Each module declares one or more `static` [`Decoder`] descriptors; the
//! closed [`ALL_DECODERS`] table is the single source the registry is
//! populated from. Adding a type means adding its descriptor here —
//! there is no runtime discovery.

pub mod color;
pub mod extension;
pub mod font;
pub mod layers;
pub mod legend;
pub mod map;
pub mod page_layout;
pub mod property_set;
pub mod ramp;
pub mod renderer;
pub mod symbols;

use crate::registry::Decoder;

/// Every decoder known to this build, in registry order.
pub static ALL_DECODERS: &[&Decoder] = &[
    // Colors
    &color::RGB_COLOR,
    &color::CMYK_COLOR,
    &color::HSV_COLOR,
    &color::HLS_COLOR,
    &color::GRAY_COLOR,
    // Ramps
    &ramp::ALGORITHMIC_COLOR_RAMP,
    &ramp::PRESET_COLOR_RAMP,
    &ramp::MULTI_PART_COLOR_RAMP,
    // Fonts
    &font::FONT_DESCRIPTOR,
    // Symbols
    &symbols::line::SIMPLE_LINE_SYMBOL,
    &symbols::line::CARTOGRAPHIC_LINE_SYMBOL,
    &symbols::line::MULTI_LAYER_LINE_SYMBOL,
    &symbols::marker::SIMPLE_MARKER_SYMBOL,
    &symbols::marker::CHARACTER_MARKER_SYMBOL,
    &symbols::marker::MULTI_LAYER_MARKER_SYMBOL,
    &symbols::fill::SIMPLE_FILL_SYMBOL,
    &symbols::fill::LINE_FILL_SYMBOL,
    &symbols::fill::MARKER_FILL_SYMBOL,
    &symbols::fill::MULTI_LAYER_FILL_SYMBOL,
    // Renderers and legends
    &renderer::SIMPLE_RENDERER,
    &renderer::UNIQUE_VALUE_RENDERER,
    &legend::LEGEND_CLASS,
    &legend::LEGEND_GROUP,
    // Layers
    &layers::feature::FEATURE_LAYER,
    &layers::group::GROUP_LAYER,
    &layers::raster::RASTER_LAYER,
    &extension::ANNOTATION_LAYER,
    // Documents
    &map::MAP_FRAME,
    &page_layout::PAGE_LAYOUT,
    &property_set::PROPERTY_SET,
    // Special extensions
    &extension::CUSTOM_BEHAVIOR_EXTENSION,
];
