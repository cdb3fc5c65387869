//! PDF parsing and mutation using lopdf.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::PdfMarkError;
use crate::image::SignatureImage;

/// Fallback page size when no MediaBox is present (A4 in points).
pub const DEFAULT_PAGE_SIZE: (f64, f64) = (595.0, 842.0);

/// Wrapper around `lopdf::Document` holding the in-memory working copy of a
/// signing job's target. The source bytes are never mutated; all edits land
/// here and are serialized once every pass has succeeded.
#[derive(Debug)]
pub struct PdfDocument {
    doc: Document,
}

impl PdfDocument {
    /// Load a PDF from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfMarkError> {
        if bytes.is_empty() {
            return Err(PdfMarkError::InvalidInput("empty document".to_string()));
        }
        let doc = Document::load_mem(bytes)
            .map_err(|e| PdfMarkError::InvalidInput(e.to_string()))?;
        Ok(Self { doc })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Page object ID for a 1-indexed page number.
    pub fn page_id(&self, page_num: u32) -> Option<ObjectId> {
        self.doc.get_pages().get(&page_num).copied()
    }

    /// Page dimensions as (width, height), reading the MediaBox from the
    /// page or its parent, defaulting to A4 when absent.
    pub fn page_size(&self, page_num: u32) -> Result<(f64, f64), PdfMarkError> {
        let page_id = self.page_id(page_num).ok_or(PdfMarkError::PageOutOfRange {
            page: page_num,
            total: self.page_count(),
        })?;

        let mut current = Some(page_id);
        while let Some(id) = current {
            let dict = self
                .doc
                .get_object(id)
                .and_then(|o| o.as_dict())
                .map_err(|e| PdfMarkError::InvalidInput(e.to_string()))?;
            if let Some(size) = self.media_box_size(dict) {
                return Ok(size);
            }
            current = dict.get(b"Parent").and_then(|p| p.as_reference()).ok();
        }

        Ok(DEFAULT_PAGE_SIZE)
    }

    fn media_box_size(&self, dict: &Dictionary) -> Option<(f64, f64)> {
        let raw = dict.get(b"MediaBox").ok()?;
        let resolved = match raw {
            Object::Reference(id) => self.doc.get_object(*id).ok()?,
            other => other,
        };
        let arr = resolved.as_array().ok()?;
        if arr.len() != 4 {
            return None;
        }
        let llx = number(&arr[0])?;
        let lly = number(&arr[1])?;
        let urx = number(&arr[2])?;
        let ury = number(&arr[3])?;
        Some((urx - llx, ury - lly))
    }

    /// Append a content stream to a page, after its existing content.
    pub fn append_content(&mut self, page_num: u32, ops: Vec<u8>) -> Result<(), PdfMarkError> {
        let page_id = self.require_page(page_num)?;
        let stream_id = self
            .doc
            .add_object(Object::Stream(Stream::new(dictionary! {}, ops)));

        // Existing Contents may be absent, a direct stream reference, a
        // reference to an array, or an inline array.
        let current = {
            let dict = self.page_dict(page_id)?;
            dict.get(b"Contents").ok().cloned()
        };

        let new_contents = match current {
            None => Object::Reference(stream_id),
            Some(Object::Array(mut arr)) => {
                arr.push(Object::Reference(stream_id));
                Object::Array(arr)
            }
            Some(Object::Reference(id)) => {
                let target_array = self
                    .doc
                    .get_object(id)
                    .ok()
                    .and_then(|o| o.as_array().ok())
                    .cloned();
                match target_array {
                    Some(mut arr) => {
                        arr.push(Object::Reference(stream_id));
                        Object::Array(arr)
                    }
                    None => Object::Array(vec![
                        Object::Reference(id),
                        Object::Reference(stream_id),
                    ]),
                }
            }
            Some(other) => {
                return Err(PdfMarkError::InvalidInput(format!(
                    "page {page_num} has malformed Contents: {other:?}"
                )))
            }
        };

        let dict = self.page_dict_mut(page_id)?;
        dict.set("Contents", new_contents);
        Ok(())
    }

    /// Register a decoded signature raster as an image XObject in a page's
    /// resources under `name`. Opacity goes into a DeviceGray soft mask.
    pub fn register_image(
        &mut self,
        page_num: u32,
        name: &str,
        image: &SignatureImage,
    ) -> Result<(), PdfMarkError> {
        let page_id = self.require_page(page_num)?;

        let smask_id = self.doc.add_object(Object::Stream(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            image.alpha.clone(),
        )));
        let image_id = self.doc.add_object(Object::Stream(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "SMask" => smask_id,
            },
            image.rgb.clone(),
        )));

        // Resources may live inline on the page or behind a reference.
        let mut resources = {
            let dict = self.page_dict_mut(page_id)?;
            dict.remove(b"Resources")
                .unwrap_or_else(|| Object::Dictionary(dictionary! {}))
        };

        match &mut resources {
            Object::Reference(id) => {
                let res_dict = self
                    .doc
                    .get_object_mut(*id)
                    .and_then(|o| o.as_dict_mut())
                    .map_err(|e| PdfMarkError::InvalidInput(e.to_string()))?;
                set_xobject_entry(res_dict, name, image_id)?;
            }
            Object::Dictionary(dict) => {
                set_xobject_entry(dict, name, image_id)?;
            }
            other => {
                return Err(PdfMarkError::InvalidInput(format!(
                    "page {page_num} has malformed Resources: {other:?}"
                )))
            }
        }

        let dict = self.page_dict_mut(page_id)?;
        dict.set("Resources", resources);
        Ok(())
    }

    /// Set the named AcroForm field to a checked state.
    ///
    /// The toggle is monotonic: an unchecked field becomes `On`, a field
    /// already carrying one of the accepted checked encodings (`Yes`/`On`)
    /// becomes `Yes`, and nothing ever reverts to unchecked. Returns the
    /// value written, or `None` when no field carries that name.
    pub fn check_form_field(&mut self, name: &str) -> Result<Option<&'static str>, PdfMarkError> {
        let Some(field_id) = self.find_field_id(name)? else {
            return Ok(None);
        };

        let (already_checked, kids) = {
            let dict = self
                .doc
                .get_object(field_id)
                .and_then(|o| o.as_dict())
                .map_err(|e| PdfMarkError::InvalidInput(e.to_string()))?;
            (has_checked_value(dict), widget_kids(dict))
        };

        let value: &'static str = if already_checked { "Yes" } else { "On" };

        {
            let dict = self
                .doc
                .get_object_mut(field_id)
                .and_then(|o| o.as_dict_mut())
                .map_err(|e| PdfMarkError::InvalidInput(e.to_string()))?;
            dict.set("V", Object::Name(value.as_bytes().to_vec()));
            if kids.is_empty() {
                // Merged field/widget: appearance state lives here too.
                dict.set("AS", Object::Name(value.as_bytes().to_vec()));
            }
        }
        for kid in kids {
            if let Ok(kid_dict) = self
                .doc
                .get_object_mut(kid)
                .and_then(|o| o.as_dict_mut())
            {
                kid_dict.set("AS", Object::Name(value.as_bytes().to_vec()));
            }
        }

        Ok(Some(value))
    }

    /// Read the current value of a named AcroForm field, if present.
    pub fn form_field_value(&self, name: &str) -> Option<String> {
        let field_id = self.find_field_id(name).ok()??;
        let dict = self.doc.get_object(field_id).ok()?.as_dict().ok()?;
        match dict.get(b"V").ok()? {
            Object::Name(n) => String::from_utf8(n.clone()).ok(),
            Object::String(s, _) => String::from_utf8(s.clone()).ok(),
            _ => None,
        }
    }

    /// Serialize the working copy.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, PdfMarkError> {
        let mut buf = Vec::new();
        self.doc
            .save_to(&mut buf)
            .map_err(|e| PdfMarkError::OutputInvalid(e.to_string()))?;
        Ok(buf)
    }

    fn require_page(&self, page_num: u32) -> Result<ObjectId, PdfMarkError> {
        self.page_id(page_num).ok_or(PdfMarkError::PageOutOfRange {
            page: page_num,
            total: self.page_count(),
        })
    }

    fn page_dict(&self, page_id: ObjectId) -> Result<&Dictionary, PdfMarkError> {
        self.doc
            .get_object(page_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| PdfMarkError::InvalidInput(e.to_string()))
    }

    fn page_dict_mut(&mut self, page_id: ObjectId) -> Result<&mut Dictionary, PdfMarkError> {
        self.doc
            .get_object_mut(page_id)
            .and_then(|o| o.as_dict_mut())
            .map_err(|e| PdfMarkError::InvalidInput(e.to_string()))
    }

    /// Walk the AcroForm field tree for a field whose partial name matches.
    fn find_field_id(&self, name: &str) -> Result<Option<ObjectId>, PdfMarkError> {
        let catalog = self
            .doc
            .catalog()
            .map_err(|e| PdfMarkError::InvalidInput(e.to_string()))?;
        let Ok(acroform) = catalog.get(b"AcroForm") else {
            return Ok(None);
        };
        let acroform = match acroform {
            Object::Reference(id) => match self.doc.get_object(*id).ok().and_then(|o| o.as_dict().ok()) {
                Some(dict) => dict,
                None => return Ok(None),
            },
            Object::Dictionary(dict) => dict,
            _ => return Ok(None),
        };
        let Some(fields) = acroform
            .get(b"Fields")
            .ok()
            .and_then(|f| self.resolve_array(f))
        else {
            return Ok(None);
        };

        let mut stack: Vec<ObjectId> = fields
            .iter()
            .filter_map(|f| f.as_reference().ok())
            .collect();

        while let Some(id) = stack.pop() {
            let Ok(dict) = self.doc.get_object(id).and_then(|o| o.as_dict()) else {
                continue;
            };
            if let Ok(Object::String(bytes, _)) = dict.get(b"T") {
                if bytes.as_slice() == name.as_bytes() {
                    return Ok(Some(id));
                }
            }
            if let Some(kids) = dict.get(b"Kids").ok().and_then(|k| self.resolve_array(k)) {
                stack.extend(kids.iter().filter_map(|k| k.as_reference().ok()));
            }
        }

        Ok(None)
    }

    fn resolve_array<'a>(&'a self, obj: &'a Object) -> Option<&'a Vec<Object>> {
        match obj {
            Object::Array(arr) => Some(arr),
            Object::Reference(id) => self.doc.get_object(*id).ok()?.as_array().ok(),
            _ => None,
        }
    }
}

fn set_xobject_entry(
    resources: &mut Dictionary,
    name: &str,
    image_id: ObjectId,
) -> Result<(), PdfMarkError> {
    match resources.get_mut(b"XObject") {
        Ok(Object::Dictionary(xobjects)) => {
            xobjects.set(name, Object::Reference(image_id));
        }
        Ok(other) => {
            return Err(PdfMarkError::InvalidInput(format!(
                "malformed XObject resources: {other:?}"
            )))
        }
        Err(_) => {
            let mut xobjects = Dictionary::new();
            xobjects.set(name, Object::Reference(image_id));
            resources.set("XObject", Object::Dictionary(xobjects));
        }
    }
    Ok(())
}

/// Whether a field's /V already carries one of the accepted checked encodings.
fn has_checked_value(dict: &Dictionary) -> bool {
    match dict.get(b"V") {
        Ok(Object::Name(n)) => n.as_slice() == b"Yes" || n.as_slice() == b"On",
        Ok(Object::String(s, _)) => s.as_slice() == b"Yes" || s.as_slice() == b"On",
        _ => false,
    }
}

fn widget_kids(dict: &Dictionary) -> Vec<ObjectId> {
    match dict.get(b"Kids") {
        Ok(Object::Array(kids)) => kids.iter().filter_map(|k| k.as_reference().ok()).collect(),
        _ => Vec::new(),
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}
