//! Decorator Consumer
//!
//! Generates delegating proxies for layered packages and a rewired copy of
//! the entry package that calls into them. Original sources are never
//! modified; everything lands under the decorate output root.
//!
//! - `classify` - layered/entry package heuristics
//! - `edits` - byte-range edits over original source
//! - `entry` - entry-package observer
//! - `layer` - layer-package observer
//! - `proxy` - proxy rendering

mod classify;
mod edits;
mod entry;
mod layer;
mod proxy;

pub use classify::{classify_import_path, classify_package, PackageKind};
pub use edits::{apply_edits, Edit};
pub use entry::EntryObserver;
pub use layer::LayerObserver;
pub use proxy::{
    render_constructor, render_method, render_proxy_struct, ProxyConstructor, ProxyMethod, ProxyPlan,
};
