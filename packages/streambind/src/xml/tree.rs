//! Event source replaying a parsed `roxmltree` document.

use roxmltree::{Document, Node};

use super::events::{EventSource, XmlEvent};
use crate::error::Result;

/// Event source that walks a parsed document in document order.
///
/// Produces the same events as [`StreamSource`](super::StreamSource) would
/// for the same text, except that adjacent text and CDATA are already merged
/// into one text node by the parser.
pub struct TreeSource<'a, 'input> {
    stack: Vec<Cursor<'a, 'input>>,
}

/// Position inside the children of one open element.
struct Cursor<'a, 'input> {
    /// The open element; `None` for the document root.
    element: Option<Node<'a, 'input>>,
    /// Next child to visit.
    next: Option<Node<'a, 'input>>,
}

impl<'a, 'input> TreeSource<'a, 'input> {
    /// Create a source over a parsed document.
    #[must_use]
    pub fn new(document: &'a Document<'input>) -> Self {
        Self {
            stack: vec![Cursor {
                element: None,
                next: document.root().first_child(),
            }],
        }
    }
}

fn start_event(node: Node<'_, '_>) -> XmlEvent {
    XmlEvent::Start {
        name: node.tag_name().name().to_string(),
        attributes: node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect(),
    }
}

impl EventSource for TreeSource<'_, '_> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>> {
        while let Some(top) = self.stack.last_mut() {
            let Some(node) = top.next else {
                // Children exhausted: close the element, if any.
                if let Some(Cursor {
                    element: Some(element),
                    ..
                }) = self.stack.pop()
                {
                    return Ok(Some(XmlEvent::End {
                        name: element.tag_name().name().to_string(),
                    }));
                }
                continue;
            };
            top.next = node.next_sibling();

            if node.is_element() {
                self.stack.push(Cursor {
                    element: Some(node),
                    next: node.first_child(),
                });
                return Ok(Some(start_event(node)));
            }
            if node.is_text() {
                let text = node.text().unwrap_or_default().to_string();
                return Ok(Some(XmlEvent::Characters(text)));
            }
        }
        Ok(None)
    }
}
