//! Periodic resolver vs. foreground mutator on one shared registry.

use microfault::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

static GLOBAL: SharedRegistry<u8, 8> = SharedRegistry::new(LevelOrder::Normal);

#[test]
fn static_instance_is_usable() {
    GLOBAL.initialize().unwrap();
    GLOBAL
        .register(&[FaultDefinition::new(0x01, SeverityLevel::Minor)])
        .unwrap();
    GLOBAL.enable(0x01).unwrap();
    assert_eq!(
        GLOBAL.resolve().unwrap(),
        FaultInfo { level: SeverityLevel::Minor, code: 0x01 }
    );
}

#[test]
fn resolver_only_sees_registered_levels() {
    let shared: Arc<SharedRegistry<u8, 8>> = Arc::new(SharedRegistry::new(LevelOrder::Reversed));
    shared
        .register(&[
            FaultDefinition::new(0x01, SeverityLevel::Serious),
            FaultDefinition::new(0x02, SeverityLevel::General),
            FaultDefinition::new(0x03, SeverityLevel::Minor),
        ])
        .unwrap();

    let running = Arc::new(AtomicBool::new(true));
    let ticker = {
        let shared = Arc::clone(&shared);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut ticks = 0u32;
            while running.load(Ordering::Acquire) {
                let info = shared.resolve().unwrap();
                let expected = match info.code {
                    0x00 => SeverityLevel::None,
                    0x01 => SeverityLevel::Serious,
                    0x02 => SeverityLevel::General,
                    0x03 => SeverityLevel::Minor,
                    other => panic!("unexpected code {other:#x}"),
                };
                assert_eq!(info.level, expected);
                ticks += 1;
            }
            ticks
        })
    };

    for round in 0..2_000u32 {
        let code = (round % 3) as u8 + 1;
        if round % 2 == 0 {
            shared.enable(code).unwrap();
        } else {
            shared.disable(code).unwrap();
        }
        if round % 500 == 0 {
            shared.disable_all();
        }
    }

    running.store(false, Ordering::Release);
    let ticks = ticker.join().unwrap();
    assert!(ticks > 0);

    shared.disable_all();
    assert_eq!(shared.resolve().unwrap(), FaultInfo::none());
}
