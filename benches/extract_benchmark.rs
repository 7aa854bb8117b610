//! Benchmarks for textgrab extraction.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic in-memory PDFs and images; no OCR
//! engine is invoked.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use lopdf::{dictionary, Document, Object, Stream};
use textgrab::{LopdfBackend, PdfBackend, PixelArray};

/// Creates a synthetic PDF with the given number of pages.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = (0..page_count)
        .map(|i| {
            let text = format!(
                "BT /F1 12 Tf 72 700 Td (Page {} - Benchmark content for textgrab.) Tj ET",
                i + 1
            );
            let content_id = doc.add_object(Stream::new(dictionary! {}, text.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            });
            Object::Reference(page_id)
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Benchmark load + first page extraction at various document sizes.
fn bench_first_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_first_page");

    for page_count in [1, 10, 50].iter() {
        let data = create_test_pdf(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let backend = LopdfBackend::load_bytes(black_box(&data)).unwrap();
                backend.page_text(0).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark image to pixel array conversion and back.
fn bench_pixel_array(c: &mut Criterion) {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(1024, 768, Rgb([200, 200, 200])));

    c.bench_function("pixel_array_round_trip", |b| {
        b.iter(|| {
            let pixels = PixelArray::from_image(black_box(image.clone())).unwrap();
            pixels.to_image().unwrap()
        });
    });
}

criterion_group!(benches, bench_first_page, bench_pixel_array);
criterion_main!(benches);
