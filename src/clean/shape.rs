use log::debug;

use crate::data::tables::{NODE_FIELDS, WAY_FIELDS};
use crate::data::{
    ChildElement, ElementKind, NodeRecord, RawElement, ShapedElement, TagRecord, WayNodeRecord, WayRecord,
};
use crate::errors::Result;

use super::classify::TagClassifier;

/// Turns an audited element into its table records.
#[derive(Debug, Clone)]
pub struct ElementShaper {
    classifier: TagClassifier,
}

impl ElementShaper {
    pub fn new(classifier: TagClassifier) -> Self {
        ElementShaper { classifier }
    }

    pub fn shape(&self, element: &RawElement) -> Result<ShapedElement> {
        match element.kind {
            ElementKind::Node => self.shape_node(element),
            ElementKind::Way => self.shape_way(element),
        }
    }

    fn shape_node(&self, element: &RawElement) -> Result<ShapedElement> {
        let [id, lat, lon, user, uid, version, changeset, timestamp] = NODE_FIELDS;
        let node = NodeRecord {
            id: element.require(id)?.to_string(),
            lat: element.require(lat)?.to_string(),
            lon: element.require(lon)?.to_string(),
            user: element.require(user)?.to_string(),
            uid: element.require(uid)?.to_string(),
            version: element.require(version)?.to_string(),
            changeset: element.require(changeset)?.to_string(),
            timestamp: element.require(timestamp)?.to_string(),
        };

        let mut tags = Vec::new();
        for child in element.children.iter().filter(|child| child.is_tag()) {
            if let Some(tag) = self.shape_tag(&node.id, child)? {
                tags.push(tag);
            }
        }

        Ok(ShapedElement::Node { node, tags })
    }

    fn shape_way(&self, element: &RawElement) -> Result<ShapedElement> {
        let [id, user, uid, version, changeset, timestamp] = WAY_FIELDS;
        let way = WayRecord {
            id: element.require(id)?.to_string(),
            user: element.require(user)?.to_string(),
            uid: element.require(uid)?.to_string(),
            version: element.require(version)?.to_string(),
            changeset: element.require(changeset)?.to_string(),
            timestamp: element.require(timestamp)?.to_string(),
        };

        let mut way_nodes = Vec::new();
        let mut tags = Vec::new();
        for child in &element.children {
            if child.is_tag() {
                if let Some(tag) = self.shape_tag(&way.id, child)? {
                    tags.push(tag);
                }
            } else if child.is_node_ref() {
                way_nodes.push(WayNodeRecord {
                    id: way.id.clone(),
                    node_id: child.attributes.require("nd", "ref")?.to_string(),
                    position: way_nodes.len(),
                });
            }
        }

        Ok(ShapedElement::Way { way, way_nodes, tags })
    }

    fn shape_tag(&self, owner_id: &str, child: &ChildElement) -> Result<Option<TagRecord>> {
        let raw_key = child.attributes.require("tag", "k")?;
        let value = child.attributes.require("tag", "v")?;

        let Some((tag_type, key)) = self.classifier.classify(raw_key).kept() else {
            debug!(id = owner_id, key = raw_key; "Dropping tag with problem characters in key");
            return Ok(None);
        };

        Ok(Some(TagRecord {
            id: owner_id.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            tag_type: tag_type.to_string(),
        }))
    }
}
