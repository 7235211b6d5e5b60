// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! ConfigService / ConfigPort behavior against a small in-file store.

use std::cell::RefCell;
use std::collections::HashMap;

use qecp_app_core::config::{ConfigError, ConfigService, ConfigStore, PREFS_KEY};
use qecp_app_core::config_port::ConfigPort;
use qecp_app_core::prefs::{CameraView, ViewerPrefs};
use qecp_app_core::render_port::{RedrawFlag, RenderPort};

#[derive(Default)]
struct MapStore {
    data: RefCell<HashMap<String, Vec<u8>>>,
    broken: bool,
}

impl ConfigStore for MapStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        if self.broken {
            return Err(ConfigError::Unavailable("disk on fire".into()));
        }
        self.data
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        if self.broken {
            return Err(ConfigError::Unavailable("disk on fire".into()));
        }
        self.data.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[test]
fn missing_and_empty_blobs_load_as_none() {
    let svc = ConfigService::new(MapStore::default());
    assert!(svc.load::<ViewerPrefs>(PREFS_KEY).unwrap().is_none());
    svc.store().save_raw(PREFS_KEY, b"").unwrap();
    assert!(svc.load::<ViewerPrefs>(PREFS_KEY).unwrap().is_none());
    assert_eq!(
        svc.load_or_default::<ViewerPrefs>(PREFS_KEY).unwrap(),
        ViewerPrefs::default()
    );
}

#[test]
fn prefs_round_trip_through_port() {
    let svc = ConfigService::new(MapStore::default());
    let mut prefs = ViewerPrefs::default();
    prefs.camera.view = CameraView::Left;
    prefs.hover_effect = false;
    svc.save_prefs(&prefs);
    assert_eq!(svc.load_prefs(), Some(prefs));
}

#[test]
fn corrupt_blob_is_a_decode_error_but_port_degrades() {
    let svc = ConfigService::new(MapStore::default());
    svc.store().save_raw(PREFS_KEY, b"{not json").unwrap();
    assert!(matches!(
        svc.load::<ViewerPrefs>(PREFS_KEY),
        Err(ConfigError::Decode { .. })
    ));
    assert_eq!(svc.load_prefs(), None);
}

#[test]
fn broken_store_never_panics_the_port() {
    let svc = ConfigService::new(MapStore {
        broken: true,
        ..MapStore::default()
    });
    svc.save_prefs(&ViewerPrefs::default());
    assert_eq!(svc.load_prefs(), None);
}

#[test]
fn redraw_flag_counts_and_clears() {
    let flag = RedrawFlag::new();
    assert!(!flag.take());
    flag.request_redraw();
    flag.request_redraw();
    assert!(flag.take());
    assert!(!flag.take());
    assert_eq!(flag.requests(), 2);
}
