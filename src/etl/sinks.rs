use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::data::{ShapedElement, Table};
use crate::errors::Result;

/// The five CSV outputs of a run, opened together and closed together.
pub struct TableSinks {
    writers: HashMap<Table, Writer<File>>,
    row_counts: HashMap<Table, u64>,
}

impl TableSinks {
    /// Creates every table file in `dir` and writes its header row.
    pub fn create(dir: &Path) -> Result<Self> {
        let mut writers = HashMap::new();
        for table in Table::ALL {
            let mut writer = Writer::from_path(dir.join(table.file_name()))?;
            writer.write_record(table.columns())?;
            writers.insert(table, writer);
        }

        Ok(TableSinks {
            writers,
            row_counts: Table::ALL.into_iter().map(|table| (table, 0)).collect(),
        })
    }

    pub fn write(&mut self, shaped: &ShapedElement) -> Result<()> {
        for (table, row) in shaped.rows() {
            let values = row.values();
            if let Some(writer) = self.writers.get_mut(&table) {
                writer.write_record(values.iter().map(|value| value.as_bytes()))?;
            }
            *self.row_counts.entry(table).or_insert(0) += 1;
        }
        Ok(())
    }

    /// Flushes every table and returns how many rows each one received.
    pub fn finish(mut self) -> Result<HashMap<Table, u64>> {
        for writer in self.writers.values_mut() {
            writer.flush()?;
        }
        Ok(self.row_counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{NodeRecord, TagRecord};

    #[test]
    fn headers_are_written_even_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let counts = TableSinks::create(dir.path()).unwrap().finish().unwrap();

        assert!(counts.values().all(|count| *count == 0));
        let ways = std::fs::read_to_string(dir.path().join("ways.csv")).unwrap();
        assert_eq!(ways, "id,user,uid,version,changeset,timestamp\n");
        let way_nodes = std::fs::read_to_string(dir.path().join("ways_nodes.csv")).unwrap();
        assert_eq!(way_nodes, "id,node_id,position\n");
    }

    #[test]
    fn quotes_values_that_need_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut sinks = TableSinks::create(dir.path()).unwrap();
        sinks
            .write(&ShapedElement::Node {
                node: NodeRecord {
                    id: "1".into(),
                    lat: "25.1".into(),
                    lon: "55.2".into(),
                    user: "Ali, \"the mapper\"".into(),
                    uid: "1".into(),
                    version: "1".into(),
                    changeset: "1".into(),
                    timestamp: "t".into(),
                },
                tags: vec![TagRecord {
                    id: "1".into(),
                    key: "name".into(),
                    value: "مقهى".into(),
                    tag_type: "regular".into(),
                }],
            })
            .unwrap();
        let counts = sinks.finish().unwrap();

        assert_eq!(counts[&Table::Nodes], 1);
        assert_eq!(counts[&Table::NodeTags], 1);
        let nodes = std::fs::read_to_string(dir.path().join("nodes.csv")).unwrap();
        assert_eq!(
            nodes,
            "id,lat,lon,user,uid,version,changeset,timestamp\n1,25.1,55.2,\"Ali, \"\"the mapper\"\"\",1,1,1,t\n"
        );
        let tags = std::fs::read_to_string(dir.path().join("nodes_tags.csv")).unwrap();
        assert_eq!(tags, "id,key,value,type\n1,name,مقهى,regular\n");
    }
}
