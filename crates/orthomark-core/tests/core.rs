#[path = "core/dms.rs"]
mod dms;
#[path = "core/elevation.rs"]
mod elevation;
#[path = "core/properties.rs"]
mod properties;
#[path = "core/transformer.rs"]
mod transformer;
