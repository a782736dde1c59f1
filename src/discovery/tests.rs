use super::*;
use crate::core::time::FixedClock;
use crate::handler::{HandlerDescriptor, HandlerMetadata, HandlerType};
use crate::test_support::{AlphaHandler, BetaHandler, BrokenHandler, LabelsHandler, WooHandler};
use chrono::{TimeZone, Utc};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

struct UnreadableSource;

impl HandlerSource for UnreadableSource {
    fn location(&self) -> String {
        "plugins/missing".to_string()
    }

    fn candidates(&self) -> DiscoveryResult<Vec<HandlerDescriptor>> {
        Err(DiscoveryError::SourceUnavailable {
            location: self.location(),
            cause: "no such directory".to_string(),
        })
    }
}

/// Blocks its first scan until released
struct GatedSource {
    inner: StaticSource,
    entered: Mutex<Option<Sender<()>>>,
    release: Mutex<Option<Receiver<()>>>,
}

impl HandlerSource for GatedSource {
    fn location(&self) -> String {
        self.inner.location()
    }

    fn candidates(&self) -> DiscoveryResult<Vec<HandlerDescriptor>> {
        if let Some(entered) = self.entered.lock().unwrap().take() {
            entered.send(()).unwrap();
            if let Some(release) = self.release.lock().unwrap().take() {
                release.recv().unwrap();
            }
        }
        self.inner.candidates()
    }
}

fn never() -> bool {
    false
}

fn blank_description() -> HandlerMetadata {
    HandlerMetadata::new("blank", "Blank", " ")
}

fn shouting_name() -> HandlerMetadata {
    HandlerMetadata::new("Shouting Name", "Shouting", "Name is not a slug")
}

fn fixture_source() -> StaticSource {
    StaticSource::new("fixtures")
        .with(HandlerDescriptor::of::<LabelsHandler>())
        .with(HandlerDescriptor::of::<AlphaHandler>())
        .with(HandlerDescriptor::of::<BetaHandler>())
        .with(HandlerDescriptor::of::<WooHandler>())
}

fn service_over(source: StaticSource) -> DiscoveryService {
    DiscoveryService::new(vec![Arc::new(source)])
}

#[test]
fn test_priority_then_title_ordering() {
    let service = service_over(fixture_source());
    let catalog = service.discover(false).unwrap();

    let titles: Vec<&str> = catalog.iter().map(|e| e.metadata.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Woo", "Labels"]);

    let priorities: Vec<i32> = catalog.iter().map(|e| e.metadata.priority).collect();
    assert_eq!(priorities, vec![10, 10, 30, 50]);
}

#[test]
fn test_ordering_independent_of_registration_order() {
    let reversed = StaticSource::new("fixtures")
        .with(HandlerDescriptor::of::<WooHandler>())
        .with(HandlerDescriptor::of::<BetaHandler>())
        .with(HandlerDescriptor::of::<AlphaHandler>())
        .with(HandlerDescriptor::of::<LabelsHandler>());

    assert_eq!(
        service_over(reversed).names().unwrap(),
        service_over(fixture_source()).names().unwrap()
    );
}

#[test]
fn test_cached_snapshot_is_shared_until_refresh() {
    let service = service_over(fixture_source());

    let first = service.discover(false).unwrap();
    let second = service.discover(false).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let refreshed = service.discover(true).unwrap();
    assert!(!Arc::ptr_eq(&first, &refreshed));
    assert_eq!(*first, *refreshed);
}

#[test]
fn test_add_source_invalidates_cache() {
    let service = service_over(StaticSource::new("first").with(HandlerDescriptor::of::<AlphaHandler>()));
    assert_eq!(service.names().unwrap(), vec!["alpha"]);

    service.add_source(Arc::new(
        StaticSource::new("second").with(HandlerDescriptor::of::<WooHandler>()),
    ));
    assert_eq!(service.names().unwrap(), vec!["alpha", "woo"]);
    assert_eq!(service.locations(), vec!["first", "second"]);

    let woo = service.find_by_name("woo").unwrap().unwrap();
    assert_eq!(woo.source, "second");
}

#[test]
fn test_source_added_during_scan_is_not_hidden_by_cache() {
    let (entered_tx, entered_rx) = channel();
    let (release_tx, release_rx) = channel();
    let gated = GatedSource {
        inner: StaticSource::new("first").with(HandlerDescriptor::of::<AlphaHandler>()),
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(Some(release_rx)),
    };
    let service = Arc::new(DiscoveryService::new(vec![Arc::new(gated)]));

    let scanning = {
        let service = Arc::clone(&service);
        thread::spawn(move || service.discover(false).unwrap())
    };
    entered_rx.recv().unwrap();
    service.add_source(Arc::new(
        StaticSource::new("second").with(HandlerDescriptor::of::<WooHandler>()),
    ));
    release_tx.send(()).unwrap();

    let in_flight = scanning.join().unwrap();
    assert_eq!(in_flight.len(), 1);
    assert_eq!(service.names().unwrap(), vec!["alpha", "woo"]);
}

#[test]
fn test_invalidate_forces_rescan() {
    let start = Utc.with_ymd_and_hms(2025, 7, 27, 9, 0, 0).unwrap();
    let clock = Arc::new(FixedClock::new(start));
    let service = service_over(fixture_source()).with_clock(clock.clone());

    let first = service.discover(false).unwrap();
    assert!(first.iter().all(|e| e.discovered_at == start));

    clock.advance(60);
    assert_eq!(service.discover(false).unwrap()[0].discovered_at, start);

    service.invalidate();
    let rescanned = service.discover(false).unwrap();
    assert!(rescanned
        .iter()
        .all(|e| e.discovered_at == start + chrono::Duration::seconds(60)));
}

#[test]
fn test_non_conforming_candidates_are_skipped() {
    let abstract_base = HandlerDescriptor::abstract_base(
        "catexport::exporters::CsvExporterBase",
        AlphaHandler::metadata,
        AlphaHandler::priority,
    );
    let unavailable = HandlerDescriptor {
        is_available: never,
        ..HandlerDescriptor::of::<BetaHandler>()
    };
    let stale_api = HandlerDescriptor {
        api_version: 19990101,
        ..HandlerDescriptor::of::<WooHandler>()
    };
    let incomplete = HandlerDescriptor {
        type_name: "fixtures::Blank",
        metadata: blank_description,
        ..HandlerDescriptor::of::<AlphaHandler>()
    };
    let not_a_slug = HandlerDescriptor {
        type_name: "fixtures::Shouting",
        metadata: shouting_name,
        ..HandlerDescriptor::of::<BetaHandler>()
    };

    let source = StaticSource::new("fixtures")
        .with(abstract_base)
        .with(unavailable)
        .with(stale_api)
        .with(incomplete)
        .with(not_a_slug)
        .with(HandlerDescriptor::of::<LabelsHandler>());

    assert_eq!(service_over(source).names().unwrap(), vec!["labels"]);
}

#[test]
fn test_construction_is_not_attempted_during_discovery() {
    let source = StaticSource::new("fixtures").with(HandlerDescriptor::of::<BrokenHandler>());
    assert_eq!(service_over(source).names().unwrap(), vec!["broken"]);
}

#[test]
fn test_duplicate_names_are_rejected() {
    let impostor = HandlerDescriptor {
        type_name: "thirdparty::AlphaClone",
        ..HandlerDescriptor::of::<AlphaHandler>()
    };
    let service = service_over(fixture_source());
    service.add_source(Arc::new(StaticSource::new("thirdparty").with(impostor)));

    match service.discover(false) {
        Err(DiscoveryError::DuplicateName { name, second, .. }) => {
            assert_eq!(name, "alpha");
            assert_eq!(second, "thirdparty::AlphaClone");
        }
        other => panic!("expected duplicate name error, got {:?}", other.map(|c| c.len())),
    }
}

#[test]
fn test_same_type_in_overlapping_sources_is_listed_once() {
    let service = service_over(fixture_source());
    service.add_source(Arc::new(
        StaticSource::new("overlap").with(HandlerDescriptor::of::<AlphaHandler>()),
    ));
    assert_eq!(service.discover(false).unwrap().len(), 4);
}

#[test]
fn test_unreadable_source_contributes_nothing() {
    let service = DiscoveryService::new(vec![
        Arc::new(UnreadableSource),
        Arc::new(fixture_source()),
    ]);
    assert_eq!(service.names().unwrap().len(), 4);
}

#[test]
fn test_entries_carry_bookkeeping() {
    let service = service_over(fixture_source());
    let alpha = service.find_by_name("alpha").unwrap().unwrap();

    assert_eq!(alpha.source, "fixtures");
    assert!(alpha.type_name.ends_with("AlphaHandler"));
    assert_eq!(alpha.api_version, crate::core::version::get_api_version());
    assert_eq!(alpha.metadata.version, "1.0.0");
    assert_eq!(alpha.metadata.author, "Unknown");
    assert!(alpha.descriptor.is_concrete());
}

#[test]
fn test_lookup_helpers() {
    let service = service_over(fixture_source());

    assert!(service.find_by_name("missing").unwrap().is_none());

    let pos: Vec<String> = service
        .find_by_category("pos")
        .unwrap()
        .into_iter()
        .map(|e| e.metadata.name)
        .collect();
    assert_eq!(pos, vec!["alpha", "beta"]);

    assert_eq!(
        service.categories().unwrap(),
        vec!["ecommerce", "pos", "printing"]
    );
    assert!(service.find_by_category("nothing").unwrap().is_empty());
}

#[test]
fn test_builtin_exporters_are_discovered_in_priority_order() {
    let service = DiscoveryService::builtin();
    assert_eq!(
        service.names().unwrap(),
        vec!["pricebook", "square", "woocommerce", "labels"]
    );
    assert!(service
        .discover(false)
        .unwrap()
        .iter()
        .all(|e| e.source == BUILTIN_LOCATION));
}
