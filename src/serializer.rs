//! Rendering of the page tree: the `/Pages` root object and, for every page, a
//! content stream object followed by its `/Page` dictionary.

use crate::codec::StreamCodec;
use crate::colour::ColorFormatter;
use crate::error::{PageError, Result};
use crate::page::Page;
use crate::refs::{ObjectReferences, RefType};
use chrono::prelude::*;
use pdf_writer::{Chunk, Date, Finish, Name, Primitive, Ref, Str};
use std::collections::HashMap;

/// Placeholder replaced by the page's rendered number
pub const PAGE_NUMBER_PLACEHOLDER: &str = "~#PN";
/// Placeholder replaced by the number of pages in the page's group
pub const PAGE_TOTAL_PLACEHOLDER: &str = "~#PT";

/// Output of a page tree render
#[derive(Debug, Clone)]
pub struct RenderedPages {
    pub bytes: Vec<u8>,
    /// Object number of the `/Pages` root
    pub root: i32,
    /// Object number reserved for the shared resource dictionary, which the
    /// caller is expected to write
    pub resources: i32,
    /// Page dictionary object numbers, in stack order
    pub page_objects: Vec<i32>,
}

/// Serializes a page stack into PDF object syntax
pub struct PageSerializer<'a> {
    pub unit_ratio: f64,
    /// Omit the transparency `/Group` entry
    pub pdfa: bool,
    /// Omit the `/LastModified` entry
    pub sigapp: bool,
    pub codec: &'a dyn StreamCodec,
    pub colours: &'a dyn ColorFormatter,
}

impl PageSerializer<'_> {
    /// Render `pages`, allocating object numbers after `*last_object` and leaving
    /// it at the highest number used.
    ///
    /// The root takes the first number, the resource dictionary the second, then
    /// every page dictionary in stack order, then every content stream. Fails with
    /// [PageError::InvalidObjectNumber] when `*last_object` is negative or the
    /// numbers would overflow, leaving it untouched.
    pub fn render(&self, pages: &[Page], last_object: &mut i32) -> Result<RenderedPages> {
        let needed = pages
            .len()
            .checked_mul(2)
            .and_then(|n| n.checked_add(2))
            .and_then(|n| i32::try_from(n).ok());
        if *last_object < 0 || needed.and_then(|n| last_object.checked_add(n)).is_none() {
            return Err(PageError::InvalidObjectNumber(*last_object));
        }

        let mut refs = ObjectReferences::starting_after(*last_object);
        let root = refs.gen(RefType::PageTree);
        let resources = refs.gen(RefType::ResourceDict);
        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        for i in 0..pages.len() {
            refs.gen(RefType::ContentForPage(i));
        }

        let mut chunk = Chunk::new();
        chunk
            .pages(root)
            .kids(page_refs.iter().copied())
            .count(pages.len() as i32);

        let numbers = page_numbers(pages);
        let mut group_totals: HashMap<u32, usize> = HashMap::new();
        for page in pages {
            *group_totals.entry(page.group).or_default() += 1;
        }

        for (i, page) in pages.iter().enumerate() {
            let page_ref = page_refs[i];
            let content_ref = refs
                .get(RefType::ContentForPage(i))
                .unwrap_or(page_ref);
            let content = page
                .content_text()
                .replace(PAGE_NUMBER_PLACEHOLDER, &numbers[i].to_string())
                .replace(
                    PAGE_TOTAL_PLACEHOLDER,
                    &group_totals[&page.group].to_string(),
                );

            let encoded = self.codec.encode_stream(content.as_bytes(), content_ref.get());
            let mut stream = chunk.stream(content_ref, &encoded);
            if let Some(filter) = self.codec.filter() {
                stream.filter(filter);
            }
            stream.finish();

            self.write_page(&mut chunk, page, page_ref, root, resources, content_ref);
        }

        log::debug!(
            "rendered {} pages as objects {}..={}",
            pages.len(),
            root.get(),
            refs.last()
        );
        *last_object = refs.last();

        Ok(RenderedPages {
            bytes: chunk.as_bytes().to_vec(),
            root: root.get(),
            resources: resources.get(),
            page_objects: page_refs.iter().map(|r| r.get()).collect(),
        })
    }

    fn write_page(
        &self,
        chunk: &mut Chunk,
        page: &Page,
        id: Ref,
        root: Ref,
        resources: Ref,
        content: Ref,
    ) {
        let modified = (!self.sigapp)
            .then(|| self.codec.encode_string(&date_string(pdf_date(page.time)), id.get()));

        let mut writer = chunk.page(id);
        writer.parent(root);
        if !self.pdfa {
            writer.group().transparency().color_space().device_rgb();
        }
        if let Some(modified) = &modified {
            writer.pair(Name(b"LastModified"), Str(modified));
        }
        writer.pair(Name(b"Resources"), resources);
        page.boxes.render_boxes(&mut writer);
        page.boxes
            .render_styling(&mut writer, self.unit_ratio, self.colours);
        writer.contents(content);
        writer.rotate(page.rotation);
        writer.pair(Name(b"PZ"), page.zoom as f32);
        if let Some(transition) = &page.transition {
            transition.write(&mut writer);
        }

        let annotations: Vec<Ref> = page
            .annotation_refs
            .iter()
            .filter_map(|&n| match i32::try_from(n) {
                Ok(n) if n > 0 => Some(Ref::new(n)),
                _ => {
                    log::warn!("skipping invalid annotation object number {n}");
                    None
                }
            })
            .collect();
        if !annotations.is_empty() {
            writer.annotations(annotations);
        }
        writer.finish();
    }
}

/// Rendered page numbers: the explicit number when set, otherwise 1 for the first
/// page of a group and the previous page of the same group plus one after that
pub fn page_numbers(pages: &[Page]) -> Vec<u32> {
    let mut last_in_group: HashMap<u32, u32> = HashMap::new();
    pages
        .iter()
        .map(|page| {
            let number = match (page.number, last_in_group.get(&page.group)) {
                (Some(number), _) => number,
                (None, Some(previous)) => previous + 1,
                (None, None) => 1,
            };
            last_in_group.insert(page.group, number);
            number
        })
        .collect()
}

/// The PDF date of a Unix timestamp, in UTC
pub fn pdf_date(unix_seconds: i64) -> Date {
    let time = DateTime::from_timestamp(unix_seconds, 0).unwrap_or_default();
    Date::new(u16::try_from(time.year()).unwrap_or_default())
        .month(time.month() as u8)
        .day(time.day() as u8)
        .hour(time.hour() as u8)
        .minute(time.minute() as u8)
        .second(time.second() as u8)
        .utc_offset_hour(0)
        .utc_offset_minute(0)
}

/// The bytes of a date string without its delimiters, as handed to the codec
fn date_string(date: Date) -> Vec<u8> {
    let mut buf = Vec::new();
    date.write(&mut buf);
    match buf.strip_prefix(b"(").and_then(|b| b.strip_suffix(b")")) {
        Some(inner) => inner.to_vec(),
        None => buf,
    }
}
