//! Streaming event source on top of `quick-xml`.

use std::io::BufRead;
use std::str;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::events::{EventSource, XmlEvent};
use crate::config::READ_BUFFER_CAPACITY;
use crate::error::{BindError, Result};

/// Event source reading XML incrementally from any `BufRead`.
///
/// Only the current event is held in memory. Element and attribute names are
/// reported without namespace prefix, text is unescaped, CDATA sections are
/// reported as character data and `<empty/>` elements as a start and an end.
/// Namespace declarations, comments, processing instructions and the
/// declaration/doctype are not reported.
///
/// Reaching the end of input while an element is still open is a
/// `MalformedDocument` error.
pub struct StreamSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending_end: Option<String>,
    open: Vec<String>,
    finished: bool,
}

impl<R: BufRead> StreamSource<R> {
    /// Create a source over a buffered reader.
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(false);

        Self {
            reader,
            buf: Vec::with_capacity(READ_BUFFER_CAPACITY),
            pending_end: None,
            open: Vec::new(),
            finished: false,
        }
    }

    fn element_name(local_name: &[u8]) -> Result<String> {
        Ok(str::from_utf8(local_name)?.to_string())
    }

    fn attributes(start: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let name = str::from_utf8(attr.key.local_name().as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((name, value));
        }
        Ok(attributes)
    }
}

impl<R: BufRead> EventSource for StreamSource<R> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>> {
        if let Some(name) = self.pending_end.take() {
            return Ok(Some(XmlEvent::End { name }));
        }
        if self.finished {
            return Ok(None);
        }

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(ref e) => {
                    let name = Self::element_name(e.local_name().as_ref())?;
                    self.open.push(name.clone());
                    XmlEvent::Start {
                        name,
                        attributes: Self::attributes(e)?,
                    }
                }
                Event::Empty(ref e) => {
                    let name = Self::element_name(e.local_name().as_ref())?;
                    self.pending_end = Some(name.clone());
                    XmlEvent::Start {
                        name,
                        attributes: Self::attributes(e)?,
                    }
                }
                Event::End(ref e) => {
                    self.open.pop();
                    XmlEvent::End {
                        name: Self::element_name(e.local_name().as_ref())?,
                    }
                }
                Event::Text(ref e) => XmlEvent::Characters(e.unescape()?.into_owned()),
                Event::CData(ref e) => XmlEvent::Characters(str::from_utf8(e)?.to_string()),
                Event::Eof => {
                    self.finished = true;
                    if let Some(name) = self.open.last() {
                        return Err(BindError::malformed(format!(
                            "input ended inside <{name}>"
                        )));
                    }
                    return Ok(None);
                }
                _ => continue,
            };
            return Ok(Some(event));
        }
    }
}
