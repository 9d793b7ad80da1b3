use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quad_batch::{
    quad_type_for_transformed_rect, PerspQuad, Quad, QuadList, QuadType, RectF, TQuadList,
    TransPerspective,
};

const COUNTS: [usize; 3] = [64, 1024, 16384];

fn rect(i: usize) -> RectF {
    let f = (i % 512) as f32;
    RectF::new(f, f * 0.5, f + 8.0, f * 0.5 + 8.0)
}

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    let m = TransPerspective::new_rotation(0.3);
    let ty = quad_type_for_transformed_rect(&m);

    for &n in &COUNTS {
        group.throughput(Throughput::Elements(n as u64));
        let quads: Vec<Quad> = (0..n).map(|i| Quad::from_rect_transform(&rect(i), &m)).collect();

        group.bench_with_input(BenchmarkId::new("affine", n), &quads, |b, quads| {
            b.iter(|| {
                let mut list = QuadList::new();
                list.reserve(quads.len(), ty);
                for q in quads {
                    list.push_back(q, ty);
                }
                black_box(list.count())
            })
        });

        // Worst case for the w channel: one perspective quad at the end
        // forces a backfill of everything before it.
        let pm = TransPerspective::new_perspective(0.0, 0.01);
        let persp = PerspQuad::from_rect_transform(&rect(0), &pm);
        group.bench_with_input(BenchmarkId::new("late_perspective", n), &quads, |b, quads| {
            b.iter(|| {
                let mut list = QuadList::new();
                for q in quads {
                    list.push_back(q, ty);
                }
                list.push_back(&persp, QuadType::Perspective);
                black_box(list.weights().map(|ws| ws.len()))
            })
        });
    }

    group.finish();
}

fn bench_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("concat");

    for &n in &COUNTS {
        group.throughput(Throughput::Elements(n as u64));
        let mut src: TQuadList<u32> = TQuadList::new();
        for i in 0..n {
            src.push_back(&Quad::from_rect(&rect(i)), QuadType::Rect, i as u32);
        }

        group.bench_with_input(BenchmarkId::new("rect", n), &src, |b, src| {
            b.iter(|| {
                let mut dst = TQuadList::new();
                dst.concat(src);
                black_box(dst.count())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_push_back, bench_concat);
criterion_main!(benches);
