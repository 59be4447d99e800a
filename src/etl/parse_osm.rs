use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use xz::bufread::XzDecoder;

use crate::data::{Attributes, ChildElement, ElementKind, RawElement};
use crate::errors::{Error, ErrorKind, Result};

/// Streams top-level `<node>` and `<way>` elements out of an OSM XML document.
/// Only one element is held in memory at a time.
pub struct OsmElements<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    current: Option<RawElement>,
    // Open elements, counting the document root as 1.
    depth: usize,
    root_seen: bool,
    finished: bool,
}

pub type OsmSource = OsmElements<Box<dyn BufRead>>;

/// Depth of the node/way elements we export: direct children of the root.
const ELEMENT_DEPTH: usize = 1;

impl<R: BufRead> OsmElements<R> {
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(true);

        OsmElements {
            reader,
            buf: Vec::new(),
            current: None,
            depth: 0,
            root_seen: false,
            finished: false,
        }
    }

    fn parse_attributes(el: &BytesStart) -> Result<Attributes> {
        let mut attributes = Vec::new();
        for attribute_res in el.attributes() {
            let attribute = attribute_res?;
            let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(attributes.into_iter().collect())
    }

    fn parse_child(el: &BytesStart) -> Result<ChildElement> {
        let name = std::str::from_utf8(el.name().as_ref())?.to_string();
        Ok(ChildElement::new(name, Self::parse_attributes(el)?))
    }

    fn open_root(root_seen: &mut bool, el: &BytesStart) -> Result<()> {
        if *root_seen {
            let name = String::from_utf8_lossy(el.name().as_ref()).into_owned();
            return Err(Error::malformed(format!("Unexpected <{name}> after the document root element")));
        }
        *root_seen = true;
        Ok(())
    }

    fn end_of_document(&mut self) -> Result<Option<RawElement>> {
        if let Some(open) = self.current.take() {
            return Err(Error::malformed(format!(
                "Document ended inside an open <{}> element",
                open.kind.tag_name()
            )));
        }
        if self.depth > 0 {
            return Err(Error::malformed("Document ended before the root element was closed"));
        }
        if !self.root_seen {
            return Err(Error::malformed("Document has no root element"));
        }
        Ok(None)
    }

    fn next_element(&mut self) -> Result<Option<RawElement>> {
        loop {
            // if we don't keep a borrow elsewhere, we can clear the buffer to keep memory usage low
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Eof => return self.end_of_document(),
                Event::Start(e) => {
                    if self.depth == 0 {
                        Self::open_root(&mut self.root_seen, &e)?;
                    } else if self.depth == ELEMENT_DEPTH {
                        if let Some(kind) = ElementKind::from_tag_name(e.name().as_ref()) {
                            self.current = Some(RawElement::new(kind, Self::parse_attributes(&e)?));
                        }
                    } else if self.depth == ELEMENT_DEPTH + 1 {
                        if let Some(current) = self.current.as_mut() {
                            current.children.push(Self::parse_child(&e)?);
                        }
                    }
                    self.depth += 1;
                }
                Event::Empty(e) => {
                    if self.depth == 0 {
                        Self::open_root(&mut self.root_seen, &e)?;
                    } else if self.depth == ELEMENT_DEPTH {
                        if let Some(kind) = ElementKind::from_tag_name(e.name().as_ref()) {
                            return Ok(Some(RawElement::new(kind, Self::parse_attributes(&e)?)));
                        }
                    } else if self.depth == ELEMENT_DEPTH + 1 {
                        if let Some(current) = self.current.as_mut() {
                            current.children.push(Self::parse_child(&e)?);
                        }
                    }
                }
                Event::End(_) => {
                    if self.depth == 0 {
                        return Err(Error::malformed("Closing tag without a matching opening tag"));
                    }
                    self.depth -= 1;
                    if self.depth == ELEMENT_DEPTH && self.current.is_some() {
                        return Ok(self.current.take());
                    }
                }
                Event::Text(_) | Event::CData(_) if self.depth == 0 => {
                    return Err(Error::malformed("Character data outside the document root element"));
                }
                // Declarations, comments, text and the like carry nothing we export.
                _ => (),
            }
        }
    }
}

impl<R: BufRead> Iterator for OsmElements<R> {
    type Item = Result<RawElement>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_element() {
            Ok(Some(element)) => Some(Ok(element)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// Opens an OSM file, decompressing it on the fly when it ends in `.xz`.
pub fn open_osm_file(path: &Path) -> Result<OsmSource> {
    let file = fs::File::open(path)
        .map_err(|err| Error::new(ErrorKind::Io, format!("Could not open {}: {err}", path.display())))?;
    let file_reader = BufReader::new(file);

    let input: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "xz") {
        let xz_reader = XzDecoder::new(file_reader);
        Box::new(BufReader::new(xz_reader))
    } else {
        Box::new(file_reader)
    };

    Ok(OsmElements::new(input))
}
