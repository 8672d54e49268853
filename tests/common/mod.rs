//! Builders for small in-memory PDFs used by the integration tests.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One page of a fixture document.
pub struct FixturePage {
    pub text: &'static str,
    pub images: Vec<Stream>,
}

impl FixturePage {
    pub fn text(text: &'static str) -> Self {
        Self {
            text,
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: Stream) -> Self {
        self.images.push(image);
        self
    }
}

/// An unfiltered 8-bit DeviceRGB image.
pub fn rgb_image(width: u32, height: u32) -> Stream {
    let samples = (0..width * height)
        .flat_map(|i| [(i * 40 % 256) as u8, 0x80, 0xFF])
        .collect::<Vec<u8>>();
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        samples,
    )
}

/// A DCTDecode (JPEG) image.
pub fn jpeg_image(width: u32, height: u32) -> Stream {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Jpeg)
        .unwrap();
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        out.into_inner(),
    )
    .with_compression(false)
}

/// A DeviceCMYK image, which the extractor cannot convert to PNG.
pub fn cmyk_image() -> Stream {
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 1,
            "Height" => 1,
            "ColorSpace" => "DeviceCMYK",
            "BitsPerComponent" => 8,
        },
        vec![0, 0, 0, 0xFF],
    )
}

/// Build a PDF with one page per entry of `pages`.
pub fn build_pdf(pages: Vec<FixturePage>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let mut operations = Vec::new();
        let mut xobjects = lopdf::Dictionary::new();

        for (k, image) in page.images.into_iter().enumerate() {
            let name = format!("Im{}", k);
            let image_id = doc.add_object(image);
            xobjects.set(name.as_bytes().to_vec(), image_id);
            operations.extend(draw(&name));
        }

        if !page.text.is_empty() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 24.into()]));
            operations.push(Operation::new("Td", vec![72.into(), 700.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(page.text)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
                "XObject" => xobjects,
            },
        });
        kids.push(page_id.into());
    }

    finish(doc, pages_id, kids, None)
}

/// Add the page tree and catalog, then serialize.
fn finish(
    mut doc: Document,
    pages_id: lopdf::ObjectId,
    kids: Vec<Object>,
    resources: Option<lopdf::Dictionary>,
) -> Vec<u8> {
    let count = kids.len() as i64;
    let mut pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    if let Some(resources) = resources {
        pages.set("Resources", resources);
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn draw(name: &str) -> Vec<Operation> {
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![100.into(), 0.into(), 0.into(), 100.into(), 50.into(), 50.into()],
        ),
        Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
        Operation::new("Q", vec![]),
    ]
}

/// One page that draws `image` only through a Form XObject `/Fm0`.
///
/// With `also_direct`, the page's own resources list the same image as `/Im0`.
pub fn form_image_pdf(image: Stream, also_direct: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let image_id = doc.add_object(image);

    let form_content = Content {
        operations: draw("Im0"),
    };
    let form_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => vec![0.into(), 0.into(), 1.into(), 1.into()],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        },
        form_content.encode().unwrap(),
    ));

    let mut xobjects = dictionary! { "Fm0" => form_id };
    let mut operations = draw("Fm0");
    if also_direct {
        xobjects.set("Im0", image_id);
        operations.extend(draw("Im0"));
    }

    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        Content { operations }.encode().unwrap(),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! { "XObject" => xobjects },
    });

    finish(doc, pages_id, vec![page_id.into()], None)
}

/// Two pages without their own `/Resources`; the image sits on the page tree.
pub fn inherited_image_pdf(image: Stream) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let image_id = doc.add_object(image);

    let mut kids: Vec<Object> = Vec::new();
    for _ in 0..2 {
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            Content {
                operations: draw("Im0"),
            }
            .encode()
            .unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let resources = dictionary! {
        "XObject" => dictionary! { "Im0" => image_id },
    };
    finish(doc, pages_id, kids, Some(resources))
}

/// Build a PDF and write it to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, pages: Vec<FixturePage>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}

/// The two-page "Hello" / "World" document; page 2 carries one image.
pub fn hello_world(dir: &Path) -> PathBuf {
    write_pdf(
        dir,
        "hello_world.pdf",
        vec![
            FixturePage::text("Hello"),
            FixturePage::text("World").with_image(rgb_image(3, 2)),
        ],
    )
}
