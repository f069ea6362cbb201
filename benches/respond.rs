use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use autoreply::{AutoResponder, AutoreplyConfig, InMemoryRuleStore, RuleDraft, RuleStore};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

fn setup_store(tenants: usize, rules_per_tenant: usize) -> InMemoryRuleStore {
    let store = InMemoryRuleStore::new();
    for t in 0..tenants {
        for i in 0..rules_per_tenant {
            let draft = RuleDraft {
                synonyms: vec![format!("alias {i}")],
                priority: (i % 10) as i32,
                ..RuleDraft::new(format!("keyword {i}"), format!("response {i}"))
            };
            store
                .create(&format!("tenant-{t}"), draft)
                .expect("create should succeed");
        }
    }
    store
}

/// Store lookup, match and usage tracking for one message
fn bench_respond_from_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("respond_from_store");
    let (responder, _) =
        AutoResponder::from_config(&AutoreplyConfig::default()).expect("default config is valid");
    let store = setup_store(4, 50);

    for (name, message) in [("hit", "alias 25"), ("miss", "where is my parcel")] {
        group.bench_function(name, |b| {
            b.iter(|| responder.respond_from_store(&store, black_box("tenant-1"), black_box(message)));
        });
    }
    group.finish();
}

/// Concurrent responders sharing one usage store
fn bench_concurrent_respond(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_respond");
    let per_thread = 500;
    let (responder, _) =
        AutoResponder::from_config(&AutoreplyConfig::default()).expect("default config is valid");
    let store = Arc::new(setup_store(8, 50));
    let rules: Vec<_> = (0..8).map(|t| store.active_rules(&format!("tenant-{t}"))).collect();
    let rules = Arc::new(rules);

    for num_threads in [1usize, 2, 4, 8] {
        group.throughput(Throughput::Elements((num_threads * per_thread) as u64));
        group.bench_function(format!("{num_threads}_threads"), |b| {
            b.iter(|| {
                let handles: Vec<_> = (0..num_threads)
                    .map(|t| {
                        let responder = responder.clone();
                        let rules = Arc::clone(&rules);
                        thread::spawn(move || {
                            let tenant = format!("tenant-{t}");
                            for i in 0..per_thread {
                                let message = format!("keyword {}", i % 50);
                                black_box(responder.respond(&tenant, &message, &rules[t]));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().expect("thread should finish");
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_respond_from_store, bench_concurrent_respond);
criterion_main!(benches);
