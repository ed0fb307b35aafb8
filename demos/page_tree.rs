use pdf_pages::{
    colours, BoxKind, BoxSet, BoxStyle, Config, Direction, LineStyle, Margins, PageInput,
    PageStore, Rect, TransitionInput, Unit,
};
use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // run with RUST_LOG=debug to see the page stack at work
    env_logger::init();

    // everything we pass in is measured in millimetres, and we want readable output
    let config = Config::default().with_unit(Unit::Mm).with_compress(false);
    let ratio = config.unit_ratio();
    let mut store = PageStore::new(config);

    // a two-column A4 page with 20mm margins all around, a 10mm header, and
    // margins mirrored on alternating pages
    store.add(
        PageInput::default()
            .with_format("A4")
            .with_margins(
                Margins::symmetric(20.0, 15.0)
                    .with_header(10.0)
                    .with_booklet(true),
            )
            .with_columns(2)
            .with_transition(
                TransitionInput::new("Wipe")
                    .with_page_duration(5.0)
                    .with_direction(Direction::Angle(90)),
            ),
    )?;

    // fill the columns with some text, breaking to the next column (and page)
    // whenever a line won't fit
    let line_height = 6.0;
    for line in lipsum::lipsum_words(400).split(". ") {
        store.check_region_break(line_height, None, None)?;
        let (x, y) = (store.get_cursor_x(None)?, store.get_cursor_y(None)?);
        store.add_content(format!("BT 1 0 0 1 {x:.2} {y:.2} Tm (~#PN/~#PT {line}) Tj ET\n"), None)?;
        store.set_cursor_y(y + line_height, None)?;
    }

    // a landscape page with a dashed red trim box, in its own numbering group
    let mut boxes = BoxSet::new();
    boxes.set(
        BoxKind::TrimBox,
        Rect::new(10.0 * ratio, 10.0 * ratio, 287.0 * ratio, 200.0 * ratio),
        Some(BoxStyle {
            colour: colours::RED,
            width: 0.5,
            style: LineStyle::Dashed,
            dash: vec![2.0, 1.0],
        }),
        ratio,
    );
    store.add(
        PageInput::default()
            .with_format("A4")
            .with_orientation(pdf_pages::Orientation::Landscape)
            .with_boxes(boxes)
            .with_group(1),
    )?;
    store.add_content("BT (appendix page ~#PN) Tj ET", None)?;

    eprintln!(
        "{} pages, {} in the main group",
        store.len(),
        store.group_page_count(0)
    );

    // the catalog and resource dictionary would be objects 1 and 2 of a real document
    let mut last_object = 2;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    store.write_to(&mut out, &mut last_object)?;
    out.flush()?;

    eprintln!(
        "page tree root is object {:?}, resources go in object {:?}",
        store.root_object(),
        store.resource_dict_object()
    );
    Ok(())
}
