use miniz_oxide::inflate::decompress_to_vec_zlib;
use pdf_pages::{Config, PageError, PageInput, PageStore, StreamCodec, TransitionInput};
use pdf_writer::Filter;

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn page_tree_root_lists_pages_in_order() {
    let mut store = PageStore::new(Config::default().with_unit(0.75));
    for _ in 0..3 {
        store.add(PageInput::default()).unwrap();
    }

    let mut last_object = 0;
    let out = text(&store.render(&mut last_object).unwrap());
    assert!(out.starts_with(
        "1 0 obj\n<<\n  /Type /Pages\n  /Kids [3 0 R 4 0 R 5 0 R]\n  /Count 3\n>>\nendobj\n\n"
    ));
    assert_eq!(store.root_object(), Some(1));
    assert_eq!(store.resource_dict_object(), Some(2));
    assert_eq!(last_object, 8);

    assert_eq!(out.matches("  /MediaBox [0 0 ").count(), 3);
    assert!(out.contains("      /W 1\n      /S /S\n      /D [2.25]\n"));
    assert!(out.contains("  /Rotate 0\n  /PZ 1\n>>\nendobj\n"));
    assert_eq!(out.matches("/Type /Page\n").count(), 3);
    assert_eq!(out.matches("/Filter /FlateDecode").count(), 3);
}

#[test]
fn rendering_continues_the_object_counter() {
    let mut store = PageStore::new(Config::default());
    store.add(PageInput::default()).unwrap();

    let mut last_object = 0;
    store.render(&mut last_object).unwrap();
    let out = text(&store.render(&mut last_object).unwrap());
    assert!(out.starts_with("5 0 obj\n<<\n  /Type /Pages\n  /Kids [7 0 R]\n  /Count 1\n>>"));
    assert_eq!(store.pages()[0].object_number, Some(7));
}

#[test]
fn numbering_follows_live_stack_order() {
    let mut store = PageStore::new(Config::default().with_compress(false));
    for i in 0..4 {
        store
            .add(PageInput::default().with_content(format!("page {i} is ~#PN of ~#PT")))
            .unwrap();
    }
    store.delete(Some(1)).unwrap();

    let out = text(&store.render(&mut 0).unwrap());
    assert!(out.contains("page 0 is 1 of 3"));
    assert!(out.contains("page 2 is 2 of 3"));
    assert!(out.contains("page 3 is 3 of 3"));
}

#[test]
fn compressed_content_inflates_to_the_page_content() {
    let filler = lipsum::lipsum(120);
    let mut store = PageStore::new(Config::default());
    store.add(PageInput::default().with_content(&filler)).unwrap();
    store.add_content(" ET", None).unwrap();

    let bytes = store.render(&mut 0).unwrap();
    let marker = b"stream\n";
    let start = bytes
        .windows(marker.len())
        .position(|w| w == marker)
        .unwrap()
        + marker.len();
    let end = bytes
        .windows(b"\nendstream".len())
        .position(|w| w == b"\nendstream")
        .unwrap();
    let inflated = decompress_to_vec_zlib(&bytes[start..end]).unwrap();
    assert_eq!(text(&inflated), format!("{filler} ET"));
}

/// Reverses every stream payload and prefixes strings with their object number
struct Scramble;

impl StreamCodec for Scramble {
    fn encode_stream(&self, bytes: &[u8], _object: i32) -> Vec<u8> {
        bytes.iter().rev().copied().collect()
    }

    fn filter(&self) -> Option<Filter> {
        None
    }

    fn encode_string(&self, bytes: &[u8], object: i32) -> Vec<u8> {
        let mut tagged = format!("{object}:").into_bytes();
        tagged.extend_from_slice(bytes);
        tagged
    }
}

#[test]
fn custom_codec_sees_object_numbers() {
    let mut store = PageStore::new(Config::default()).with_stream_codec(Scramble);
    store
        .add(
            PageInput::default()
                .with_content("abc")
                .with_time(0)
                .with_transition(TransitionInput::new("Split").with_dimension("V")),
        )
        .unwrap();

    let out = text(&store.render(&mut 0).unwrap());
    assert!(out.contains("4 0 obj\n<<\n  /Length 3\n>>\nstream\ncba\nendstream\n"));
    assert!(out.contains("  /LastModified (3:D:19700101000000Z)\n"));
    assert!(out.contains("    /S /Split\n    /D 1\n    /Dm /V\n    /B false\n"));
}

#[test]
fn config_switches_drop_entries() {
    let config: Config = serde_json::from_str(r#"{ "pdfa": true, "sigapp": true }"#).unwrap();
    let mut store = PageStore::new(config);
    store.add(PageInput::default()).unwrap();
    let out = text(&store.render(&mut 0).unwrap());
    assert!(!out.contains("/Group"));
    assert!(!out.contains("/LastModified"));
}

#[test]
fn negative_object_counters_are_rejected() {
    let mut store = PageStore::new(Config::default());
    store.add(PageInput::default()).unwrap();

    let mut last_object = -1;
    let err = store.render(&mut last_object).unwrap_err();
    assert!(matches!(err, PageError::InvalidObjectNumber(-1)));
    assert_eq!(last_object, -1);
    assert!(store.write_to(Vec::new(), &mut -5).is_err());
}

#[test]
fn boxes_and_dashed_styles_from_json_render() {
    let input: PageInput = serde_json::from_str(
        r#"{
            "format": "MediaBox",
            "boxes": {
                "MediaBox": {
                    "rect": { "llx": 0, "lly": 0, "urx": 300, "ury": 400 },
                    "style": {
                        "colour": { "RGB": { "r": 0, "g": 0, "b": 1 } },
                        "width": 2,
                        "style": "dashed",
                        "dash": [4]
                    }
                }
            }
        }"#,
    )
    .unwrap();

    let mut store = PageStore::new(Config::default().with_compress(false));
    store.add(input).unwrap();
    let out = text(&store.render(&mut 0).unwrap());
    assert!(out.contains("  /MediaBox [0 0 300 400]\n  /CropBox [0 0 300 400]\n"));
    assert!(out.contains(
        "    /MediaBox <<\n      /C [0 0 1]\n      /W 2\n      /S /D\n      /D [4]\n    >>\n"
    ));
    assert!(out.contains("    /ArtBox <<\n      /C [0 0 0]\n      /W 1\n      /S /S\n"));
}
