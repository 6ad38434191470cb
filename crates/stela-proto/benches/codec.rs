//! Codec benchmarks: question decoding and answer encoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use stela_proto::wire::WireWriter;
use stela_proto::{Name, Question, Record, RecordType, SoaDefaults};

fn query_packet() -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.write_bytes(&[0x04, 0xD2, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0]);
    Question::a("www.example.com").unwrap().write_to(&mut writer);
    writer.as_bytes().to_vec()
}

fn compressed_name_packet() -> Vec<u8> {
    // example.com at offset 0, www.<ptr> after it
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&[7]);
    bytes.extend_from_slice(b"example");
    bytes.extend_from_slice(&[3]);
    bytes.extend_from_slice(b"com");
    bytes.push(0);
    bytes.extend_from_slice(&[3]);
    bytes.extend_from_slice(b"www");
    bytes.extend_from_slice(&[0xC0, 0x00]);
    bytes
}

fn name_benchmarks(c: &mut Criterion) {
    let packet = query_packet();
    let compressed = compressed_name_packet();

    let mut group = c.benchmark_group("name");
    group.throughput(Throughput::Elements(1));

    group.bench_function("parse_plain", |b| {
        b.iter(|| Name::parse(black_box(&packet), 12).unwrap());
    });

    group.bench_function("parse_compressed", |b| {
        b.iter(|| Name::parse(black_box(&compressed), 13).unwrap());
    });

    group.finish();
}

fn question_benchmarks(c: &mut Criterion) {
    let packet = query_packet();

    c.bench_function("question/parse", |b| {
        b.iter(|| Question::parse(black_box(&packet), 12).unwrap());
    });
}

fn answer_benchmarks(c: &mut Criterion) {
    let soa = SoaDefaults::default();
    let a = Record::new("example.com", RecordType::A, "192.0.2.1");
    let mx = Record::new("example.com", RecordType::Mx, "10 mail.example.com");

    let mut group = c.benchmark_group("answer");

    group.bench_function("encode_a", |b| {
        b.iter(|| {
            let mut writer = WireWriter::with_capacity(32);
            a.write_answer(&mut writer, &soa);
            black_box(writer.len())
        });
    });

    group.bench_function("encode_mx", |b| {
        b.iter(|| {
            let mut writer = WireWriter::with_capacity(48);
            mx.write_answer(&mut writer, &soa);
            black_box(writer.len())
        });
    });

    group.finish();
}

criterion_group!(benches, name_benchmarks, question_benchmarks, answer_benchmarks);
criterion_main!(benches);
