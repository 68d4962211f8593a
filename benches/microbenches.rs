//! Criterion microbenches for VOC parsing and CSV rendering.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - VOC XML parsing (parse_voc_xml_str, parse_voc_xml_slice)
//! - Caption text splitting (parse_captions_str)
//! - CSV line rendering of annotations (Record::csv)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use voc_tools::io::caption_txt::parse_captions_str;
use voc_tools::io::voc_xml::{parse_voc_xml_slice, parse_voc_xml_str};
use voc_tools::io::ReadOptions;
use voc_tools::record::Record;

const VOC_FIXTURE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<annotation>
  <folder>JPEGImages</folder>
  <filename>P00002.jpg</filename>
  <size>
    <width>1024</width>
    <height>768</height>
    <depth>3</depth>
  </size>
  <object>
    <name>knife</name>
    <pose>Unspecified</pose>
    <bndbox>
      <xmin>274</xmin>
      <ymin>232</ymin>
      <xmax>610</xmax>
      <ymax>460</ymax>
    </bndbox>
  </object>
  <object>
    <name>scissors</name>
    <bndbox>
      <xmin>12</xmin>
      <ymin>40</ymin>
      <xmax>98</xmax>
      <ymax>77</ymax>
    </bndbox>
  </object>
  <object>
    <name>gun</name>
    <bndbox>
      <xmin>600</xmin>
      <ymin>500</ymin>
      <xmax>900</xmax>
      <ymax>700</ymax>
    </bndbox>
  </object>
</annotation>
"#;

const CAPTION_FIXTURE: &str = "a knife inside a backpack\n\n  two blades near the laptop  \nscissors at the bottom of the bag\n";

/// Benchmark VOC XML parsing from string.
fn bench_voc_parse_str(c: &mut Criterion) {
    let opts = ReadOptions::default();
    let mut group = c.benchmark_group("voc_parse");
    group.throughput(Throughput::Bytes(VOC_FIXTURE.len() as u64));

    group.bench_function("parse_voc_xml_str", |b| {
        b.iter(|| {
            let anns = parse_voc_xml_str(black_box(VOC_FIXTURE), "P00002.xml", &opts);
            black_box(anns)
        })
    });

    group.finish();
}

/// Benchmark VOC XML parsing from byte slice.
fn bench_voc_parse_slice(c: &mut Criterion) {
    let opts = ReadOptions::default();
    let bytes = VOC_FIXTURE.as_bytes();
    let mut group = c.benchmark_group("voc_parse");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("parse_voc_xml_slice", |b| {
        b.iter(|| {
            let anns = parse_voc_xml_slice(black_box(bytes), "P00002.xml", &opts);
            black_box(anns)
        })
    });

    group.finish();
}

/// Benchmark caption splitting.
fn bench_caption_parse(c: &mut Criterion) {
    let opts = ReadOptions::default();
    let mut group = c.benchmark_group("caption_parse");
    group.throughput(Throughput::Bytes(CAPTION_FIXTURE.len() as u64));

    group.bench_function("parse_captions_str", |b| {
        b.iter(|| {
            let captions = parse_captions_str(black_box(CAPTION_FIXTURE), "P00002.txt", &opts);
            black_box(captions)
        })
    });

    group.finish();
}

/// Benchmark CSV line rendering.
///
/// The fixture is parsed once outside the timed region.
fn bench_csv_lines(c: &mut Criterion) {
    let anns = parse_voc_xml_str(VOC_FIXTURE, "P00002.xml", &ReadOptions::default());

    let mut group = c.benchmark_group("csv_lines");
    group.throughput(Throughput::Elements(anns.len() as u64));

    group.bench_function("annotation_csv", |b| {
        b.iter(|| {
            let lines: Vec<String> = black_box(&anns).iter().map(Record::csv).collect();
            black_box(lines)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_voc_parse_str,
    bench_voc_parse_slice,
    bench_caption_parse,
    bench_csv_lines,
);
criterion_main!(benches);
