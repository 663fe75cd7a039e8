// ── Descriptor reconciliation ──
//
// Each response shape owns exactly one slice of `ClientState` (`/info`
// owns three). Applying a shape replaces its slices wholesale and never
// reads or writes any other slice, so responses may arrive in any order.

use chrono::Utc;
use pylights_api::Descriptor;

use crate::model::{ClientState, DeveloperInfo, Light, PlaybackState, Preset, RemapSession};

/// What a single reconciliation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Some slice now differs from before.
    pub changed: bool,
    /// The playback slice was replaced (even if with an equal value).
    /// The playback clock must be re-armed whenever this is set.
    pub playback_replaced: bool,
}

/// Fold `descriptor` into `state`.
pub fn reconcile(state: &mut ClientState, descriptor: Descriptor) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    match descriptor {
        Descriptor::Info(info) => {
            outcome.changed |= replace(&mut state.playback, PlaybackState::from(info.songs));
            outcome.changed |= replace(&mut state.lights, lights(info.lights.lights));
            outcome.changed |= replace(&mut state.presets, presets(info.presets.presets));
            state.last_refresh = Some(Utc::now());
            outcome.changed = true;
            outcome.playback_replaced = true;
        }
        Descriptor::Songs(songs) => {
            outcome.changed = replace(&mut state.playback, PlaybackState::from(songs));
            outcome.playback_replaced = true;
        }
        Descriptor::Lights(d) => {
            outcome.changed = replace(&mut state.lights, lights(d.lights));
        }
        Descriptor::Presets(d) => {
            outcome.changed = replace(&mut state.presets, presets(d.presets));
        }
        Descriptor::Remap(d) => {
            outcome.changed = replace(&mut state.remap, RemapSession::from_remaining(d.remaining));
        }
        Descriptor::Developer(d) => {
            outcome.changed = replace(&mut state.developer, Some(DeveloperInfo::from(d)));
        }
    }

    outcome
}

fn lights(raw: Vec<pylights_api::LightDescriptor>) -> Vec<Light> {
    raw.into_iter().map(Light::from).collect()
}

fn presets(raw: Vec<pylights_api::PresetDescriptor>) -> Vec<Preset> {
    raw.into_iter().map(Preset::from).collect()
}

/// Overwrite `slot` with `value`, reporting whether anything changed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use pylights_api::{
        DeveloperDescriptor, InfoDescriptor, LightDescriptor, LightsDescriptor, PresetDescriptor, PresetsDescriptor,
        RemapDescriptor, SongDescriptor, SongsDescriptor,
    };

    fn song(title: &str, length_ms: f64) -> SongDescriptor {
        SongDescriptor {
            title: title.into(),
            artist: "Mannheim Steamroller".into(),
            album_art: String::new(),
            length_ms,
        }
    }

    fn songs_playing(position: f64) -> SongsDescriptor {
        SongsDescriptor {
            songs: vec![song("Deck the Halls", 180_000.0), song("Silent Night", 200_000.0)],
            playing: Some(song("Deck the Halls", 180_000.0)),
            paused: false,
            current_time_ms: position,
            volume: 70,
        }
    }

    fn lights_desc(porch_on: bool) -> LightsDescriptor {
        LightsDescriptor {
            lights: vec![
                LightDescriptor {
                    name: "porch".into(),
                    gpio: 17,
                    value: porch_on,
                },
                LightDescriptor {
                    name: "tree".into(),
                    gpio: 27,
                    value: false,
                },
            ],
        }
    }

    fn remap(remaining: Option<&[&str]>) -> Descriptor {
        Descriptor::Remap(RemapDescriptor {
            remaining: remaining.map(|r| r.iter().map(|s| (*s).to_owned()).collect()),
        })
    }

    #[test]
    fn lights_reconciliation_leaves_other_slices_untouched() {
        let mut state = ClientState::default();
        reconcile(&mut state, Descriptor::Songs(songs_playing(5_000.0)));
        reconcile(&mut state, remap(Some(&["porch"])));
        let before = state.clone();

        let outcome = reconcile(&mut state, Descriptor::Lights(lights_desc(true)));

        assert!(outcome.changed);
        assert!(!outcome.playback_replaced);
        assert_eq!(state.playback, before.playback);
        assert_eq!(state.remap, before.remap);
        assert_eq!(state.presets, before.presets);
        assert_eq!(state.light("porch").unwrap().channel, 17);
    }

    #[test]
    fn songs_reconciliation_leaves_other_slices_untouched() {
        let mut state = ClientState::default();
        reconcile(&mut state, Descriptor::Lights(lights_desc(true)));
        reconcile(
            &mut state,
            Descriptor::Presets(PresetsDescriptor {
                presets: vec![PresetDescriptor {
                    name: "porch only".into(),
                    lights: vec!["porch".into()],
                }],
            }),
        );
        reconcile(&mut state, remap(Some(&["tree"])));
        reconcile(
            &mut state,
            Descriptor::Developer(DeveloperDescriptor {
                version: "2.1.0".into(),
                ip_address: "10.0.0.7".into(),
                cpu_usage: 12.5,
                led_server_ip_address: None,
                led_server_status: Some(true),
                serial_port: None,
            }),
        );
        let before = state.clone();

        let outcome = reconcile(&mut state, Descriptor::Songs(songs_playing(5_000.0)));

        assert!(outcome.changed);
        assert!(outcome.playback_replaced);
        assert_eq!(state.lights, before.lights);
        assert_eq!(state.presets, before.presets);
        assert_eq!(state.remap, before.remap);
        assert_eq!(state.developer, before.developer);
        assert_eq!(state.playback.position_ms, 5_000);
    }

    #[test]
    fn songs_reconciliation_is_idempotent() {
        let mut state = ClientState::default();
        let first = reconcile(&mut state, Descriptor::Songs(songs_playing(5_000.0)));
        let after_first = state.clone();
        let second = reconcile(&mut state, Descriptor::Songs(songs_playing(5_000.0)));

        assert!(first.changed);
        assert!(!second.changed);
        assert!(second.playback_replaced);
        assert_eq!(state, after_first);
    }

    #[test]
    fn info_replaces_three_slices_and_stamps_refresh() {
        let mut state = ClientState::default();
        reconcile(&mut state, remap(Some(&["tree"])));

        let info = InfoDescriptor {
            songs: songs_playing(0.0),
            lights: lights_desc(false),
            presets: PresetsDescriptor {
                presets: vec![PresetDescriptor {
                    name: "all".into(),
                    lights: vec!["porch".into(), "tree".into()],
                }],
            },
        };
        let outcome = reconcile(&mut state, Descriptor::Info(info));

        assert!(outcome.playback_replaced);
        assert_eq!(state.playback.songs.len(), 2);
        assert_eq!(state.lights.len(), 2);
        assert_eq!(state.preset("all").unwrap().lights.len(), 2);
        assert!(state.last_refresh.is_some());
        assert_eq!(state.remap, RemapSession::Active(vec!["tree".into()]));
    }

    #[test]
    fn remap_lifecycle_shrinks_then_completes() {
        let mut state = ClientState::default();

        reconcile(&mut state, remap(Some(&["A", "B", "C"])));
        assert_eq!(state.remap.current(), Some("A"));
        reconcile(&mut state, remap(Some(&["B", "C"])));
        reconcile(&mut state, remap(Some(&["C"])));
        reconcile(&mut state, remap(Some(&[])));
        assert!(state.remap.is_complete());

        reconcile(&mut state, remap(None));
        assert_eq!(state.remap, RemapSession::Idle);
    }

    #[test]
    fn remap_cancel_from_any_point_is_idle() {
        let mut state = ClientState::default();
        reconcile(&mut state, remap(Some(&["A", "B", "C"])));
        reconcile(&mut state, remap(Some(&["B", "C"])));

        reconcile(&mut state, remap(None));

        assert_eq!(state.remap, RemapSession::Idle);
    }
}
