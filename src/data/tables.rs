use std::borrow::Cow;

/// Column value types used by schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    String,
}

/// The five output tables. Column order is the order downstream loaders expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Nodes,
    NodeTags,
    Ways,
    WayNodes,
    WayTags,
}

const NODE_SCHEMA: &[(&str, FieldType)] = &[
    ("id", FieldType::Integer),
    ("lat", FieldType::Float),
    ("lon", FieldType::Float),
    ("user", FieldType::String),
    ("uid", FieldType::Integer),
    ("version", FieldType::String),
    ("changeset", FieldType::Integer),
    ("timestamp", FieldType::String),
];

const WAY_SCHEMA: &[(&str, FieldType)] = &[
    ("id", FieldType::Integer),
    ("user", FieldType::String),
    ("uid", FieldType::Integer),
    ("version", FieldType::String),
    ("changeset", FieldType::Integer),
    ("timestamp", FieldType::String),
];

const TAG_SCHEMA: &[(&str, FieldType)] = &[
    ("id", FieldType::Integer),
    ("key", FieldType::String),
    ("value", FieldType::String),
    ("type", FieldType::String),
];

const WAY_NODE_SCHEMA: &[(&str, FieldType)] = &[
    ("id", FieldType::Integer),
    ("node_id", FieldType::Integer),
    ("position", FieldType::Integer),
];

pub const NODE_FIELDS: [&str; 8] = ["id", "lat", "lon", "user", "uid", "version", "changeset", "timestamp"];
pub const WAY_FIELDS: [&str; 6] = ["id", "user", "uid", "version", "changeset", "timestamp"];

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Nodes,
        Table::NodeTags,
        Table::Ways,
        Table::WayNodes,
        Table::WayTags,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Nodes => "nodes",
            Table::NodeTags => "node_tags",
            Table::Ways => "ways",
            Table::WayNodes => "way_nodes",
            Table::WayTags => "way_tags",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Table::Nodes => "nodes.csv",
            Table::NodeTags => "nodes_tags.csv",
            Table::Ways => "ways.csv",
            Table::WayNodes => "ways_nodes.csv",
            Table::WayTags => "ways_tags.csv",
        }
    }

    pub fn schema(self) -> &'static [(&'static str, FieldType)] {
        match self {
            Table::Nodes => NODE_SCHEMA,
            Table::NodeTags | Table::WayTags => TAG_SCHEMA,
            Table::Ways => WAY_SCHEMA,
            Table::WayNodes => WAY_NODE_SCHEMA,
        }
    }

    pub fn columns(self) -> impl Iterator<Item = &'static str> {
        self.schema().iter().map(|(name, _)| *name)
    }
}

/// A record that can be written as one row of a table.
pub trait TableRow {
    /// Values in the table's column order.
    fn values(&self) -> Vec<Cow<'_, str>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: String,
    pub lat: String,
    pub lon: String,
    pub user: String,
    pub uid: String,
    pub version: String,
    pub changeset: String,
    pub timestamp: String,
}

impl TableRow for NodeRecord {
    fn values(&self) -> Vec<Cow<'_, str>> {
        [
            &self.id, &self.lat, &self.lon, &self.user,
            &self.uid, &self.version, &self.changeset, &self.timestamp,
        ]
        .into_iter()
        .map(|value| Cow::Borrowed(value.as_str()))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WayRecord {
    pub id: String,
    pub user: String,
    pub uid: String,
    pub version: String,
    pub changeset: String,
    pub timestamp: String,
}

impl TableRow for WayRecord {
    fn values(&self) -> Vec<Cow<'_, str>> {
        [&self.id, &self.user, &self.uid, &self.version, &self.changeset, &self.timestamp]
            .into_iter()
            .map(|value| Cow::Borrowed(value.as_str()))
            .collect()
    }
}

/// Shared by the node_tags and way_tags tables; `id` is the owning element's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub id: String,
    pub key: String,
    pub value: String,
    pub tag_type: String,
}

impl TableRow for TagRecord {
    fn values(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.key.as_str()),
            Cow::Borrowed(self.value.as_str()),
            Cow::Borrowed(self.tag_type.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WayNodeRecord {
    pub id: String,
    pub node_id: String,
    pub position: usize,
}

impl TableRow for WayNodeRecord {
    fn values(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.node_id.as_str()),
            Cow::Owned(self.position.to_string()),
        ]
    }
}

/// Every record produced from one source element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapedElement {
    Node {
        node: NodeRecord,
        tags: Vec<TagRecord>,
    },
    Way {
        way: WayRecord,
        way_nodes: Vec<WayNodeRecord>,
        tags: Vec<TagRecord>,
    },
}

impl ShapedElement {
    pub fn id(&self) -> &str {
        match self {
            ShapedElement::Node { node, .. } => &node.id,
            ShapedElement::Way { way, .. } => &way.id,
        }
    }

    pub fn tags(&self) -> &[TagRecord] {
        match self {
            ShapedElement::Node { tags, .. } | ShapedElement::Way { tags, .. } => tags,
        }
    }

    /// Each record paired with the table it belongs to, in emission order.
    pub fn rows(&self) -> Vec<(Table, &dyn TableRow)> {
        let mut rows: Vec<(Table, &dyn TableRow)> = Vec::new();
        match self {
            ShapedElement::Node { node, tags } => {
                rows.push((Table::Nodes, node as &dyn TableRow));
                rows.extend(tags.iter().map(|tag| (Table::NodeTags, tag as &dyn TableRow)));
            }
            ShapedElement::Way { way, way_nodes, tags } => {
                rows.push((Table::Ways, way as &dyn TableRow));
                rows.extend(way_nodes.iter().map(|way_node| (Table::WayNodes, way_node as &dyn TableRow)));
                rows.extend(tags.iter().map(|tag| (Table::WayTags, tag as &dyn TableRow)));
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_field_lists_match_table_columns() {
        assert_eq!(Table::Nodes.columns().collect::<Vec<_>>(), NODE_FIELDS.to_vec());
        assert_eq!(Table::Ways.columns().collect::<Vec<_>>(), WAY_FIELDS.to_vec());
        assert_eq!(
            Table::WayNodes.columns().collect::<Vec<_>>(),
            vec!["id", "node_id", "position"],
        );
    }

    #[test]
    fn way_rows_follow_sink_order() {
        let shaped = ShapedElement::Way {
            way: WayRecord {
                id: "5".into(),
                user: "u".into(),
                uid: "1".into(),
                version: "1".into(),
                changeset: "1".into(),
                timestamp: "t".into(),
            },
            way_nodes: vec![WayNodeRecord { id: "5".into(), node_id: "10".into(), position: 0 }],
            tags: vec![TagRecord {
                id: "5".into(),
                key: "highway".into(),
                value: "residential".into(),
                tag_type: "regular".into(),
            }],
        };

        let tables: Vec<Table> = shaped.rows().into_iter().map(|(table, _)| table).collect();
        assert_eq!(tables, vec![Table::Ways, Table::WayNodes, Table::WayTags]);

        let (_, way_node) = shaped.rows()[1];
        assert_eq!(way_node.values(), vec!["5", "10", "0"]);
    }
}
