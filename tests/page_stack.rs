use pdf_pages::{
    BoxKind, Config, Orientation, PageError, PageInput, PageStore, Rect, RegionSpec, Unit,
};

fn store(unit: impl Into<pdf_pages::UnitRatio>) -> PageStore {
    PageStore::new(Config::default().with_unit(unit))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn default_page() {
    let mut store = store(0.75);
    let page = store.add(PageInput::default()).unwrap();

    assert_eq!(page.id, 0);
    assert_eq!(page.format, "A4");
    assert_eq!(page.orientation, Orientation::Portrait);
    assert!(close(page.pwidth, 595.276));
    assert!(close(page.pheight, 841.890));
    assert!(close(page.width, page.pwidth / 0.75));
    assert!(close(page.height, page.pheight / 0.75));
    assert_eq!(page.content, vec![String::new()]);
    assert_eq!(page.content_marks, vec![0]);
    assert_eq!(page.rotation, 0);
    assert_eq!(page.zoom, 1.0);
    assert!(page.transition.is_none());

    let media = page.boxes.get(BoxKind::MediaBox).unwrap();
    assert_eq!(media.rect, Rect::sized(page.pwidth, page.pheight));
    let style = media.style.as_ref().unwrap();
    assert!(close(style.width, 1.3333));
    assert_eq!(style.dash, vec![3.0]);

    let region = page.region();
    assert_eq!(page.columns(), 1);
    assert_eq!((region.rx, region.ry), (0.0, 0.0));
    assert_eq!(region.rw, page.extents.content_width);
    assert_eq!(region.rh, page.extents.content_height);
    assert_eq!(
        page.extents.content_width + page.margins.pl + page.margins.pr,
        page.width
    );
}

#[test]
fn delete_and_pop() {
    let mut store = store(Unit::Pt);
    for group in [10, 20, 30] {
        store.add(PageInput::default().with_group(group)).unwrap();
    }
    assert_eq!(store.group_page_count(20), 1);

    let removed = store.delete(Some(1)).unwrap();
    assert_eq!((removed.id, removed.group), (1, 20));
    assert_eq!(store.len(), 2);
    assert_eq!(store.group_page_count(20), 0);
    assert_eq!(store.group_page_count(10), 1);
    assert_eq!(store.group_page_count(30), 1);
    assert_eq!(
        store.pages().iter().map(|p| (p.id, p.group)).collect::<Vec<_>>(),
        vec![(0, 10), (1, 30)]
    );
    assert_eq!(store.page_id(), Some(1));

    assert!(matches!(
        store.delete(Some(2)),
        Err(PageError::PageNotFound(Some(2)))
    ));

    assert_eq!(store.pop().unwrap().group, 30);
    assert_eq!(store.pop().unwrap().group, 10);
    assert!(store.is_empty());
    assert!(store.pop().is_err());
}

#[test]
fn move_backwards_only() {
    let mut store = store(Unit::Pt);
    for group in 0..4 {
        store.add(PageInput::default().with_group(group)).unwrap();
    }

    store.move_page(3, 0).unwrap();
    let groups: Vec<u32> = store.pages().iter().map(|p| p.group).collect();
    assert_eq!(groups, vec![3, 0, 1, 2]);
    assert_eq!(store.pages()[0].id, 0);

    assert!(matches!(
        store.move_page(1, 2),
        Err(PageError::InvalidMove { from: 1, to: 2 })
    ));
    assert!(store.move_page(2, 2).is_err());
    assert!(store.move_page(4, 0).is_err());
}

#[test]
fn content_marks() {
    let mut store = store(Unit::Pt);
    store.add(PageInput::default()).unwrap();
    store.add_content("Lorem", None).unwrap();
    store.add_content("ipsum", None).unwrap();
    store.mark_content(None).unwrap();
    store.add_content("dolor", None).unwrap();
    store.add_content("sit", None).unwrap();
    store.add_content("amet", None).unwrap();

    assert_eq!(store.pop_content(None).unwrap().as_deref(), Some("amet"));
    let page = store.get(None).unwrap();
    assert_eq!(page.content_marks, vec![0, 3]);
    assert_eq!(page.content, vec!["", "Lorem", "ipsum", "dolor", "sit"]);

    store.rewind_to_last_mark(None).unwrap();
    let page = store.get(None).unwrap();
    assert_eq!(page.content_marks, vec![0]);
    assert_eq!(page.content, vec!["", "Lorem", "ipsum"]);
    assert_eq!(page.content_text(), "Loremipsum");
}

#[test]
fn columns_in_millimetres() {
    let mut store = store(Unit::Mm);
    store
        .add(PageInput::default().with_format("A4").with_columns(3))
        .unwrap();

    let region = store.select_region(1, None).unwrap().clone();
    assert!(close(region.rx, 70.0));
    assert!(close(region.rw, 70.0));
    assert!(close(region.rl, 140.0));
    assert!(close(region.rr, 70.0));
    assert!(close(region.rh, 297.0));
    assert!(close(region.rt, 297.0));

    assert!(store.is_y_out_of_region(Some(-1.0), 0.0, None).unwrap());
    assert!(!store.is_y_out_of_region(Some(297.0), 0.0, None).unwrap());
    assert!(store.is_y_out_of_region(Some(298.0), 0.0, None).unwrap());
    assert!(store.is_x_out_of_region(Some(69.0), 0.0, None).unwrap());
    assert!(!store.is_x_out_of_region(Some(70.0), 0.0, None).unwrap());
    assert!(!store.is_x_out_of_region(Some(140.0), 0.0, None).unwrap());
    assert!(store.is_x_out_of_region(Some(141.0), 0.0, None).unwrap());

    assert_eq!(store.get_next_region(None).unwrap().current_region, 2);
    let page = store.get_next_region(None).unwrap();
    assert_eq!((page.id, page.current_region), (1, 0));
    assert_eq!(page.columns(), 3);
    assert_eq!(store.page_id(), Some(1));
}

#[test]
fn next_page_reuses_existing_pages() {
    let mut store = store(Unit::Pt);
    store.add(PageInput::default()).unwrap();
    store.add(PageInput::default()).unwrap();
    store.select_current(Some(0)).unwrap();

    let page = store.get_next_page(None).unwrap();
    assert_eq!(page.id, 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn region_breaks() {
    let mut store = store(Unit::Pt);
    store
        .add(
            PageInput::default()
                .with_size(200.0, 100.0)
                .with_regions(vec![
                    RegionSpec::new(0.0, 0.0, 100.0, 100.0),
                    RegionSpec::new(100.0, 0.0, 100.0, 100.0),
                ]),
        )
        .unwrap();

    // fits exactly, within the tolerance
    let page = store.check_region_break(100.00005, None, None).unwrap();
    assert_eq!(page.current_region, 0);

    store.set_cursor_y(60.0, None).unwrap();
    let page = store.check_region_break(50.0, None, None).unwrap();
    assert_eq!((page.id, page.current_region), (0, 1));
    assert_eq!(store.get_cursor_y(None).unwrap(), 0.0);

    // past the last region: a new page
    let page = store.check_region_break(10.0, Some(95.0), None).unwrap();
    assert_eq!((page.id, page.current_region), (1, 0));
}

#[test]
fn page_input_from_json() {
    let input: PageInput = serde_json::from_str(
        r#"{
            "format": "LEGAL",
            "orientation": "L",
            "rotation": 180,
            "margins": { "pl": 10, "pr": 10, "booklet": true },
            "columns": 2,
            "transition": { "S": "Fly", "Di": "None", "SS": 0.5 },
            "annotation_refs": [12, 13]
        }"#,
    )
    .unwrap();
    assert_eq!(input.orientation, Some(Orientation::Landscape));

    let mut store = store(Unit::Mm);
    let page = store.add(input).unwrap();
    assert_eq!(page.orientation, Orientation::Landscape);
    assert!(close(page.width, 355.6));
    assert!(close(page.height, 215.9));
    assert_eq!(page.rotation, 180);
    assert_eq!(page.columns(), 2);
    assert_eq!(page.annotation_refs, vec![12, 13]);
    let transition = page.transition.as_ref().unwrap();
    assert_eq!(transition.direction, Some(pdf_pages::Direction::None));
    assert_eq!(transition.scale, Some(0.5));
}

#[test]
fn page_input_boxes_from_json() {
    let input: PageInput = serde_json::from_str(
        r#"{
            "boxes": {
                "MediaBox": { "rect": { "llx": 0, "lly": 0, "urx": 400, "ury": 300 } },
                "TrimBox": {
                    "rect": { "llx": 10, "lly": 10, "urx": 390, "ury": 290 },
                    "style": {
                        "colour": { "Grey": { "g": 0.5 } },
                        "width": 1,
                        "style": "dashed",
                        "dash": [2]
                    }
                }
            },
            "format": "MediaBox"
        }"#,
    )
    .unwrap();
    let trim = input.boxes.as_ref().unwrap().get(BoxKind::TrimBox).unwrap();
    assert_eq!(trim.style.as_ref().unwrap().style, pdf_pages::LineStyle::Dashed);

    let mut store = store(Unit::Pt);
    let page = store.add(input).unwrap();
    assert_eq!(page.orientation, Orientation::Landscape);
    assert!(close(page.width, 400.0));
    assert!(close(page.height, 300.0));
    let media = page.boxes.get(BoxKind::MediaBox).unwrap();
    assert!(media.style.is_some());

    let err = serde_json::from_str::<PageInput>(
        r#"{ "boxes": { "mediabox": { "rect": { "llx": 0, "lly": 0, "urx": 1, "ury": 1 } } } }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown page box type: mediabox"));
}
