#![deny(
    clippy::mutable_key_type,
    clippy::map_entry,
    clippy::boxed_local,
    clippy::let_unit_value,
    clippy::redundant_allocation,
    clippy::bool_comparison,
    clippy::bind_instead_of_map,
    clippy::vec_box,
    clippy::while_let_loop,
    clippy::useless_asref,
    clippy::repeat_once,
    clippy::deref_addrof,
    clippy::suspicious_map,
    clippy::arc_with_non_send_sync,
    clippy::single_char_pattern,
    clippy::for_kv_map,
    clippy::let_and_return,
    clippy::iter_nth,
    clippy::iter_cloned_collect,
    clippy::bytes_nth,
    clippy::match_result_ok,
    clippy::cmp_owned,
    clippy::cmp_null,
    clippy::op_ref
)]

#[macro_use]
extern crate serde;

pub mod config;
pub mod dataset_store;
pub mod error;
pub mod frame;
pub mod geojson_export;
pub mod layers;
pub mod models;
pub mod palette;
pub mod render;
pub mod selection;

pub use dataset_store::DatasetStore;
pub use error::{DataLoadError, EmptyResultSignal, QueryError, SelectionError};
pub use palette::Palette;
pub use render::{RouteViewer, View};
pub use selection::{Category, DepotLocation, Selection, VehicleClass, ViewMode};
