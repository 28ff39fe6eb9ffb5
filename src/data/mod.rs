//! Data layer: typed records and the list-view pipeline over them.
//!
//! This module separates data storage (`RecordSet`) from presentation
//! (`ListView`), so the same search/sort/page machinery serves every
//! list in the portal.

pub mod field_compare;
pub mod list_view;
pub mod loaders;
pub mod records;
