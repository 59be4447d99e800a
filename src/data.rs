pub mod osm;
pub mod tables;

pub use self::osm::{Attributes, ChildElement, ElementKind, RawElement};
pub use self::tables::{
    NodeRecord, ShapedElement, Table, TableRow, TagRecord, WayNodeRecord, WayRecord,
};
