use crate::codec::{Flate, Identity, StreamCodec};
use crate::colour::RgbComponents;
use crate::config::Config;
use crate::error::{PageError, Result};
use crate::layout::Region;
use crate::page::{Page, PageBuilder, PageInput};
use crate::pagesize::{PageFormatProvider, StandardFormats};
use crate::serializer::PageSerializer;
use std::collections::HashMap;
use std::io::Write;

/// The page stack of a document under construction.
///
/// Pages are kept in output order and addressed by position. One of them is the
/// *current* page; every operation taking a `pid: Option<usize>` acts on the
/// current page when given `None`.
///
/// ```
/// use pdf_pages::{PageStore, PageInput, Config, Unit};
///
/// let mut store = PageStore::new(Config::default().with_unit(Unit::Mm));
/// store.add(PageInput::default().with_format("A4").with_columns(2))?;
/// store.add_content("BT /F1 12 Tf (Hello) Tj ET", None)?;
///
/// // the second column, then a fresh page cloned from the first
/// assert_eq!(store.get_next_region(None)?.current_region, 1);
/// assert_eq!(store.get_next_region(None)?.id, 1);
/// assert_eq!(store.len(), 2);
///
/// let mut last_object = 0;
/// let pdf = store.render(&mut last_object)?;
/// assert!(pdf.starts_with(b"1 0 obj\n<<\n  /Type /Pages\n  /Kids [3 0 R 4 0 R]\n  /Count 2\n>>"));
/// # Ok::<(), pdf_pages::PageError>(())
/// ```
pub struct PageStore {
    config: Config,
    formats: Box<dyn PageFormatProvider>,
    codec: Option<Box<dyn StreamCodec>>,
    pages: Vec<Page>,
    pid: Option<usize>,
    /// Allocation counter: incremented by every add and decremented by every
    /// delete, so it tracks the stack length rather than issuing unique ids
    max_id: Option<usize>,
    groups: HashMap<u32, usize>,
    root: Option<i32>,
    resources: Option<i32>,
}

impl PageStore {
    pub fn new(config: Config) -> PageStore {
        PageStore {
            config,
            formats: Box::new(StandardFormats),
            codec: None,
            pages: Vec::default(),
            pid: None,
            max_id: None,
            groups: HashMap::from([(0, 0)]),
            root: None,
            resources: None,
        }
    }

    /// Resolve format names with `provider` instead of the built-in table
    pub fn with_format_provider<P: PageFormatProvider + 'static>(mut self, provider: P) -> Self {
        self.formats = Box::new(provider);
        self
    }

    /// Encode content streams and strings with `codec` (e.g. to encrypt them)
    /// instead of the codec implied by [Config::compress]
    pub fn with_stream_codec<C: StreamCodec + 'static>(mut self, codec: C) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Index of the current page, if there are any pages
    pub fn page_id(&self) -> Option<usize> {
        self.pid
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of live pages in numbering group `group`
    pub fn group_page_count(&self, group: u32) -> usize {
        self.groups.get(&group).copied().unwrap_or(0)
    }

    /// Object number reserved for the shared resource dictionary by the last render
    pub fn resource_dict_object(&self) -> Option<i32> {
        self.resources
    }

    /// Object number of the page tree root written by the last render
    pub fn root_object(&self) -> Option<i32> {
        self.root
    }

    fn resolve(&self, pid: Option<usize>) -> Result<usize> {
        match pid.or(self.pid) {
            Some(pid) if pid < self.pages.len() => Ok(pid),
            pid => Err(PageError::PageNotFound(pid)),
        }
    }

    fn page_mut(&mut self, pid: Option<usize>) -> Result<&mut Page> {
        let pid = self.resolve(pid)?;
        Ok(&mut self.pages[pid])
    }

    fn reindex(&mut self) {
        for (i, page) in self.pages.iter_mut().enumerate() {
            page.id = i;
        }
    }

    /// Add a page at the end of the stack and make it current.
    ///
    /// An empty `input` clones the geometry and settings of the last page when
    /// there is one; otherwise the input is sanitized into a new page, defaulting
    /// to a portrait A4 page with no margins and a single region.
    pub fn add(&mut self, input: PageInput) -> Result<&Page> {
        let now = chrono::Utc::now().timestamp();
        let mut page = match self.pages.last() {
            Some(last) if input.is_empty() => last.clone_geometry(now),
            _ => PageBuilder {
                unit_ratio: self.config.unit_ratio(),
                formats: self.formats.as_ref(),
                mirror_margins: self.pid.map_or(false, |pid| pid % 2 == 0),
                now,
            }
            .build(input)?,
        };

        let id = self.max_id.map_or(0, |max| max + 1);
        self.max_id = Some(id);
        page.id = self.pages.len();
        page.max_id_at_creation = id;
        *self.groups.entry(page.group).or_default() += 1;
        log::debug!(
            "added page {} ({} {}x{}pt, group {})",
            page.id,
            page.format,
            page.pwidth,
            page.pheight,
            page.group
        );

        let pid = page.id;
        self.pages.push(page);
        self.pid = Some(pid);
        Ok(&self.pages[pid])
    }

    /// Remove and return a page, keeping the remaining pages in order
    pub fn delete(&mut self, pid: Option<usize>) -> Result<Page> {
        let pid = self.resolve(pid)?;
        let page = self.pages.remove(pid);
        if let Some(count) = self.groups.get_mut(&page.group) {
            *count = count.saturating_sub(1);
        }
        self.max_id = self.max_id.and_then(|max| max.checked_sub(1));
        self.reindex();

        self.pid = match self.pid {
            _ if self.pages.is_empty() => None,
            Some(current) if current > pid => Some(current - 1),
            Some(current) if current == pid => Some(pid.min(self.pages.len() - 1)),
            current => current,
        };
        log::debug!("deleted page {pid}, {} left", self.pages.len());
        Ok(page)
    }

    /// Remove and return the last page
    pub fn pop(&mut self) -> Result<Page> {
        match self.pages.len() {
            0 => Err(PageError::PageNotFound(None)),
            len => self.delete(Some(len - 1)),
        }
    }

    /// Move the page at `from` to the earlier position `to`, shifting the pages in
    /// between down by one. Only backward moves are supported.
    pub fn move_page(&mut self, from: usize, to: usize) -> Result<()> {
        if from <= to || from >= self.pages.len() {
            return Err(PageError::InvalidMove { from, to });
        }
        let page = self.pages.remove(from);
        self.pages.insert(to, page);
        self.reindex();
        log::debug!("moved page {from} to {to}");
        Ok(())
    }

    /// Make a page current
    pub fn select_current(&mut self, pid: Option<usize>) -> Result<&Page> {
        let pid = self.resolve(pid)?;
        self.pid = Some(pid);
        Ok(&self.pages[pid])
    }

    pub fn get(&self, pid: Option<usize>) -> Result<&Page> {
        let pid = self.resolve(pid)?;
        Ok(&self.pages[pid])
    }

    pub fn add_content<S: ToString>(&mut self, content: S, pid: Option<usize>) -> Result<()> {
        self.page_mut(pid)?.content.push(content.to_string());
        Ok(())
    }

    /// Remove and return the last content fragment
    pub fn pop_content(&mut self, pid: Option<usize>) -> Result<Option<String>> {
        Ok(self.page_mut(pid)?.content.pop())
    }

    /// Record the current content length so it can be rewound to later
    pub fn mark_content(&mut self, pid: Option<usize>) -> Result<()> {
        let page = self.page_mut(pid)?;
        page.content_marks.push(page.content.len());
        Ok(())
    }

    /// Drop every content fragment added since the last mark, and the mark itself
    pub fn rewind_to_last_mark(&mut self, pid: Option<usize>) -> Result<()> {
        let page = self.page_mut(pid)?;
        if let Some(mark) = page.content_marks.pop() {
            page.content.truncate(mark);
        }
        Ok(())
    }

    /// Make region `index` current, clamped to the regions of the page
    pub fn select_region(&mut self, index: usize, pid: Option<usize>) -> Result<&Region> {
        let page = self.page_mut(pid)?;
        page.current_region = index.min(page.regions.len() - 1);
        log::trace!("page {} region {}", page.id, page.current_region);
        Ok(page.region())
    }

    pub fn current_region(&self, pid: Option<usize>) -> Result<&Region> {
        Ok(self.get(pid)?.region())
    }

    /// Advance to the next region of the page, or to the next page when the
    /// current region is the last one
    pub fn get_next_region(&mut self, pid: Option<usize>) -> Result<&Page> {
        let pid = self.resolve(pid)?;
        let page = &mut self.pages[pid];
        if page.current_region + 1 < page.regions.len() {
            page.current_region += 1;
            log::trace!("page {pid} region {}", page.current_region);
            return Ok(&self.pages[pid]);
        }
        self.get_next_page(Some(pid))
    }

    /// Advance to the following page, adding one when needed and automatic page
    /// breaks are enabled. With automatic breaks disabled the last page stays current.
    pub fn get_next_page(&mut self, pid: Option<usize>) -> Result<&Page> {
        let pid = self.resolve(pid)?;
        if pid + 1 < self.pages.len() {
            log::trace!("advancing to page {}", pid + 1);
            return self.select_current(Some(pid + 1));
        }
        if !self.pages[pid].auto_break {
            return self.select_current(Some(pid));
        }
        self.add(PageInput::default())
    }

    /// Break to the next region when a block of `height` at `y` (by default the
    /// cursor position) does not fit the current region vertically
    pub fn check_region_break(
        &mut self,
        height: f64,
        y: Option<f64>,
        pid: Option<usize>,
    ) -> Result<&Page> {
        let pid = self.resolve(pid)?;
        let region = self.pages[pid].region();
        if region.is_y_out(y.unwrap_or(region.y), height) {
            log::trace!("region break on page {pid}");
            return self.get_next_region(Some(pid));
        }
        Ok(&self.pages[pid])
    }

    /// Whether a span of `width` at `x` (by default the cursor) leaves the current region
    pub fn is_x_out_of_region(&self, x: Option<f64>, width: f64, pid: Option<usize>) -> Result<bool> {
        let region = self.current_region(pid)?;
        Ok(region.is_x_out(x.unwrap_or(region.x), width))
    }

    /// Whether a span of `height` at `y` (by default the cursor) leaves the current region
    pub fn is_y_out_of_region(&self, y: Option<f64>, height: f64, pid: Option<usize>) -> Result<bool> {
        let region = self.current_region(pid)?;
        Ok(region.is_y_out(y.unwrap_or(region.y), height))
    }

    pub fn set_cursor_x(&mut self, x: f64, pid: Option<usize>) -> Result<()> {
        self.page_mut(pid)?.region_mut().x = x;
        Ok(())
    }

    pub fn set_cursor_y(&mut self, y: f64, pid: Option<usize>) -> Result<()> {
        self.page_mut(pid)?.region_mut().y = y;
        Ok(())
    }

    pub fn get_cursor_x(&self, pid: Option<usize>) -> Result<f64> {
        Ok(self.current_region(pid)?.x)
    }

    pub fn get_cursor_y(&self, pid: Option<usize>) -> Result<f64> {
        Ok(self.current_region(pid)?.y)
    }

    pub fn enable_auto_page_break(&mut self, enabled: bool, pid: Option<usize>) -> Result<()> {
        self.page_mut(pid)?.auto_break = enabled;
        Ok(())
    }

    pub fn is_auto_page_break_enabled(&self, pid: Option<usize>) -> Result<bool> {
        Ok(self.get(pid)?.auto_break)
    }

    /// Render the page tree, numbering objects after `*last_object` and leaving it
    /// at the highest number used. The page dictionary numbers are recorded on
    /// the pages, and the root and resource dictionary numbers on the store.
    /// A negative `*last_object` fails with [PageError::InvalidObjectNumber].
    pub fn render(&mut self, last_object: &mut i32) -> Result<Vec<u8>> {
        let flate = Flate::default();
        let codec: &dyn StreamCodec = match &self.codec {
            Some(codec) => codec.as_ref(),
            None if self.config.compress => &flate,
            None => &Identity,
        };
        let serializer = PageSerializer {
            unit_ratio: self.config.unit_ratio(),
            pdfa: self.config.pdfa,
            sigapp: self.config.sigapp,
            codec,
            colours: &RgbComponents,
        };
        let rendered = serializer.render(&self.pages, last_object)?;

        for (page, number) in self.pages.iter_mut().zip(rendered.page_objects) {
            page.object_number = Some(number);
        }
        self.root = Some(rendered.root);
        self.resources = Some(rendered.resources);
        Ok(rendered.bytes)
    }

    /// Render the page tree into `w`
    pub fn write_to<W: Write>(&mut self, mut w: W, last_object: &mut i32) -> Result<()> {
        let bytes = self.render(last_object)?;
        w.write_all(&bytes)?;
        Ok(())
    }
}

impl Default for PageStore {
    fn default() -> PageStore {
        PageStore::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(pages: usize) -> PageStore {
        let mut store = PageStore::new(Config::default().with_compress(false));
        for _ in 0..pages {
            store.add(PageInput::default().with_format("A4")).unwrap();
        }
        store
    }

    #[test]
    fn empty_store() {
        let mut store = PageStore::default();
        assert!(store.is_empty());
        assert_eq!(store.page_id(), None);
        assert_eq!(store.group_page_count(0), 0);
        assert!(matches!(store.get(None), Err(PageError::PageNotFound(None))));
        assert!(matches!(store.pop(), Err(PageError::PageNotFound(None))));
    }

    #[test]
    fn add_makes_the_page_current() {
        let mut store = store_with(2);
        assert_eq!(store.page_id(), Some(1));
        assert_eq!(store.get(None).unwrap().id, 1);
        assert_eq!(store.get(None).unwrap().max_id_at_creation, 1);
        assert_eq!(store.group_page_count(0), 2);
    }

    #[test]
    fn empty_input_clones_the_last_page() {
        let mut store = store_with(0);
        store
            .add(
                PageInput::default()
                    .with_format("A5")
                    .with_rotation(90)
                    .with_content("first")
                    .with_group(3),
            )
            .unwrap();
        let page = store.add(PageInput::default()).unwrap();
        assert_eq!(page.format, "A5");
        assert_eq!(page.rotation, 90);
        assert_eq!(page.group, 3);
        assert_eq!(page.content, vec![String::new()]);
        assert_eq!(store.group_page_count(3), 2);
    }

    #[test]
    fn delete_keeps_current_page_valid() {
        let mut store = store_with(3);
        store.select_current(Some(1)).unwrap();
        store.delete(Some(0)).unwrap();
        assert_eq!(store.page_id(), Some(0));
        store.delete(None).unwrap();
        assert_eq!(store.page_id(), Some(0));
        assert_eq!(store.pages()[0].id, 0);
        store.pop().unwrap();
        assert_eq!(store.page_id(), None);
        assert_eq!(store.group_page_count(0), 0);
    }

    #[test]
    fn booklet_margins_alternate() {
        let mut store = store_with(0);
        let input = PageInput::default()
            .with_margins(crate::Margins::trbl(0.0, 10.0, 0.0, 20.0).with_booklet(true));
        assert_eq!(store.add(input.clone()).unwrap().margins.pl, 20.0);
        assert_eq!(store.add(input.clone()).unwrap().margins.pl, 10.0);
        assert_eq!(store.add(input).unwrap().margins.pl, 20.0);
    }

    #[test]
    fn select_region_clamps() {
        let mut store = store_with(0);
        store.add(PageInput::default().with_columns(3)).unwrap();
        store.select_region(7, None).unwrap();
        assert_eq!(store.get(None).unwrap().current_region, 2);
    }

    #[test]
    fn no_auto_break_stays_on_the_last_page() {
        let mut store = store_with(0);
        store
            .add(PageInput::default().with_columns(2).with_auto_break(false))
            .unwrap();
        store.get_next_region(None).unwrap();
        let page = store.get_next_region(None).unwrap();
        assert_eq!((page.id, page.current_region), (0, 1));
        assert_eq!(store.len(), 1);
        assert!(!store.is_auto_page_break_enabled(None).unwrap());
    }

    #[test]
    fn cursor_is_not_clamped() {
        let mut store = store_with(1);
        store.set_cursor_x(-50.0, None).unwrap();
        store.set_cursor_y(1e6, None).unwrap();
        assert_eq!(store.get_cursor_x(None).unwrap(), -50.0);
        assert_eq!(store.get_cursor_y(None).unwrap(), 1e6);
        assert!(store.is_x_out_of_region(None, 0.0, None).unwrap());
        assert!(store.is_y_out_of_region(None, 0.0, None).unwrap());
        assert!(!store.is_y_out_of_region(Some(0.0), 10.0, None).unwrap());
    }

    #[test]
    fn render_records_object_numbers() {
        let mut store = store_with(2);
        let mut last = 0;
        let mut out = Vec::new();
        store.write_to(&mut out, &mut last).unwrap();
        assert_eq!(store.root_object(), Some(1));
        assert_eq!(store.resource_dict_object(), Some(2));
        assert_eq!(store.pages()[1].object_number, Some(4));
        assert_eq!(last, 6);
        assert!(!out.is_empty());
    }

    #[test]
    fn render_rejects_negative_counters() {
        let mut store = store_with(1);
        assert!(matches!(
            store.render(&mut -1),
            Err(PageError::InvalidObjectNumber(-1))
        ));
        assert_eq!(store.root_object(), None);
        assert_eq!(store.pages()[0].object_number, None);

        let mut last = 0;
        store.render(&mut last).unwrap();
        assert_eq!(last, 4);
    }
}
