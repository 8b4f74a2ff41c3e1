extern crate rsrcfork;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rsrcfork::parse_resource_fork;
use std::hint::black_box;

const TYPES: usize = 16;
const PER_TYPE: usize = 64;
const PAYLOAD: usize = 256;

/// Lay out a fork with `TYPES * PER_TYPE` named resources, payloads stored in reverse map order.
fn synthetic_fork() -> Vec<u8> {
    let count = TYPES * PER_TYPE;
    let data_length = count * (4 + PAYLOAD);
    let type_list_size = 2 + TYPES * 8;
    let references_size = count * 12;

    let mut data = Vec::with_capacity(data_length);
    let mut names = Vec::new();
    let mut references = Vec::with_capacity(references_size);

    for index in 0..count {
        let slot = count - 1 - index;
        let name = format!("Resource {index}");
        let packed = (0x20u32 << 24) | (slot * (4 + PAYLOAD)) as u32;

        references.extend_from_slice(&(index as i16).to_be_bytes());
        references.extend_from_slice(&(names.len() as u16).to_be_bytes());
        references.extend_from_slice(&packed.to_be_bytes());
        references.extend_from_slice(&[0; 4]);

        names.push(name.len() as u8);
        names.extend_from_slice(name.as_bytes());
    }
    for slot in 0..count {
        data.extend_from_slice(&(PAYLOAD as u32).to_be_bytes());
        data.extend(std::iter::repeat(slot as u8).take(PAYLOAD));
    }

    let mut map = vec![0u8; 22];
    map.extend_from_slice(&0u16.to_be_bytes());
    map.extend_from_slice(&28u16.to_be_bytes());
    map.extend_from_slice(&((28 + type_list_size + references_size) as u16).to_be_bytes());
    map.extend_from_slice(&((TYPES - 1) as u16).to_be_bytes());
    for type_index in 0..TYPES {
        map.extend_from_slice(format!("T{type_index:03}").as_bytes());
        map.extend_from_slice(&((PER_TYPE - 1) as u16).to_be_bytes());
        let references_at = type_list_size + type_index * PER_TYPE * 12;
        map.extend_from_slice(&(references_at as u16).to_be_bytes());
    }
    map.extend_from_slice(&references);
    map.extend_from_slice(&names);

    let mut fork = Vec::with_capacity(16 + data.len() + map.len());
    for field in [16, 16 + data.len(), data.len(), map.len()] {
        fork.extend_from_slice(&(field as u32).to_be_bytes());
    }
    fork.extend_from_slice(&data);
    fork.extend_from_slice(&map);
    fork
}

fn bench_parse_resource_fork(c: &mut Criterion) {
    let data = synthetic_fork();
    let resources = parse_resource_fork(&data).unwrap();
    assert_eq!(resources.len(), TYPES * PER_TYPE);

    let mut group = c.benchmark_group("resource_fork");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("parse_resource_fork", |b| {
        b.iter(|| {
            let parsed = parse_resource_fork(black_box(&data)).unwrap();
            black_box(parsed)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_parse_resource_fork);
criterion_main!(benches);
