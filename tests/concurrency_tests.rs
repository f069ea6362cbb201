//! Concurrency and thread safety tests for the responder and stores

use std::sync::Arc;
use std::thread;

use autoreply::{
    AutoResponder, AutoreplyConfig, InMemoryRuleStore, KeywordRule, RuleDraft, RuleStore,
    match_keyword,
};

#[test]
fn concurrent_matching_is_deterministic() {
    let rules = Arc::new(vec![
        KeywordRule::new("k1", "pricing", "a").with_synonyms(["cost"]),
        KeywordRule::new("k2", "support", "b").with_regex("help"),
        KeywordRule::new("k3", "hours", "c"),
    ]);
    let messages = ["pricing", "cost", "i need help", "huors", "nothing here"];
    let expected: Vec<_> = messages.iter().map(|m| match_keyword(m, &rules)).collect();
    let expected = Arc::new(expected);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let rules = Arc::clone(&rules);
            let expected = Arc::clone(&expected);
            thread::spawn(move || {
                for _ in 0..200 {
                    for (i, message) in messages.iter().enumerate() {
                        assert_eq!(match_keyword(message, &rules), expected[i]);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }
}

#[test]
fn concurrent_usage_counts_every_match() {
    let (responder, usage) =
        AutoResponder::from_config(&AutoreplyConfig::default()).expect("default config");
    let rules = Arc::new(vec![KeywordRule::new("k1", "pricing", "a")]);

    let threads = 8;
    let per_thread = 500;
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let responder = responder.clone();
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                for _ in 0..per_thread {
                    assert!(responder.respond("acme", "pricing", &rules).matched);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }
    assert_eq!(usage.count("acme", "k1"), (threads * per_thread) as u64);
}

#[test]
fn concurrent_rule_creation_across_tenants() {
    let store = Arc::new(InMemoryRuleStore::new());

    let handles: Vec<_> = (0..6)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let tenant = format!("tenant-{}", t % 3);
                for i in 0..50 {
                    store
                        .create(&tenant, RuleDraft::new(format!("kw-{t}-{i}"), "r"))
                        .expect("create should succeed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }
    assert_eq!(store.tenant_count(), 3);
    for t in 0..3 {
        assert_eq!(store.list(&format!("tenant-{t}")).len(), 100);
    }
}
