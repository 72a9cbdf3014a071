// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The closed set of native actions understood by the Radar plugin.
//
// Each row of the table fixes the wire name sent across the bridge, how many
// positional arguments the action takes, and whether it settles once or
// registers a long-lived event stream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RadarError;

/// Number of positional arguments an action forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Always an empty argument list.
    Nullary,
    /// Exactly one argument.
    Unary,
    /// One argument, or an empty list when the caller omits it.
    OptionalUnary,
}

impl Arity {
    /// Whether an argument list of `len` values fits this arity.
    pub fn accepts(self, len: usize) -> bool {
        match self {
            Self::Nullary => len == 0,
            Self::Unary => len == 1,
            Self::OptionalUnary => len <= 1,
        }
    }
}

/// How the native side completes an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Settles exactly once, with success or failure.
    SingleResult,
    /// Registers handlers that may fire any number of times until torn down.
    EventStream,
}

/// Grouping used for documentation and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Lifecycle,
    Privacy,
    Permissions,
    Location,
    TrackingModes,
    EventStreams,
    Trips,
    ContextSearch,
    Geocoding,
    Routing,
    PlatformConfig,
}

macro_rules! action_table {
    ($( $variant:ident => $name:literal, $arity:ident, $shape:ident, $category:ident; )*) => {
        /// A native action, addressed on the wire by its camelCase name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Action {
            $(
                #[serde(rename = $name)]
                $variant,
            )*
        }

        impl Action {
            /// Every action, in table order.
            pub const ALL: &'static [Action] = &[$(Action::$variant,)*];

            /// Wire name passed to the native channel.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Action::$variant => $name,)*
                }
            }

            pub const fn arity(self) -> Arity {
                match self {
                    $(Action::$variant => Arity::$arity,)*
                }
            }

            pub const fn shape(self) -> Shape {
                match self {
                    $(Action::$variant => Shape::$shape,)*
                }
            }

            pub const fn category(self) -> Category {
                match self {
                    $(Action::$variant => Category::$category,)*
                }
            }
        }
    };
}

action_table! {
    Initialize => "initialize", Unary, SingleResult, Lifecycle;
    SetUserId => "setUserId", Unary, SingleResult, Lifecycle;
    GetUserId => "getUserId", Nullary, SingleResult, Lifecycle;
    SetDescription => "setDescription", Unary, SingleResult, Lifecycle;
    GetDescription => "getDescription", Nullary, SingleResult, Lifecycle;
    SetMetadata => "setMetadata", Unary, SingleResult, Lifecycle;
    GetMetadata => "getMetadata", Nullary, SingleResult, Lifecycle;

    SetAnonymousTrackingEnabled => "setAnonymousTrackingEnabled", Unary, SingleResult, Privacy;
    SetAdIdEnabled => "setAdIdEnabled", Unary, SingleResult, Privacy;

    GetPermissionsStatus => "getPermissionsStatus", Nullary, SingleResult, Permissions;
    RequestPermissions => "requestPermissions", Unary, SingleResult, Permissions;
    RequestPermissionsSync => "requestPermissionsSync", Unary, SingleResult, Permissions;

    GetLocation => "getLocation", OptionalUnary, SingleResult, Location;
    TrackOnce => "trackOnce", OptionalUnary, SingleResult, Location;
    GetTrackingOptions => "getTrackingOptions", Nullary, SingleResult, Location;
    IsTracking => "isTracking", Nullary, SingleResult, Location;

    StartTrackingEfficient => "startTrackingEfficient", Nullary, SingleResult, TrackingModes;
    StartTrackingResponsive => "startTrackingResponsive", Nullary, SingleResult, TrackingModes;
    StartTrackingContinuous => "startTrackingContinuous", Nullary, SingleResult, TrackingModes;
    StartTrackingCustom => "startTrackingCustom", Unary, SingleResult, TrackingModes;
    MockTracking => "mockTracking", Unary, SingleResult, TrackingModes;
    StopTracking => "stopTracking", Nullary, SingleResult, TrackingModes;

    OnEvents => "onEvents", Nullary, EventStream, EventStreams;
    OnLocation => "onLocation", Nullary, EventStream, EventStreams;
    OnClientLocation => "onClientLocation", Nullary, EventStream, EventStreams;
    OnError => "onError", Nullary, EventStream, EventStreams;
    OffEvents => "offEvents", Nullary, SingleResult, EventStreams;
    OffLocation => "offLocation", Nullary, SingleResult, EventStreams;
    OffClientLocation => "offClientLocation", Nullary, SingleResult, EventStreams;
    OffError => "offError", Nullary, SingleResult, EventStreams;

    GetTripOptions => "getTripOptions", Nullary, SingleResult, Trips;
    StartTrip => "startTrip", Unary, SingleResult, Trips;
    UpdateTrip => "updateTrip", Unary, SingleResult, Trips;
    CompleteTrip => "completeTrip", Nullary, SingleResult, Trips;
    CancelTrip => "cancelTrip", Nullary, SingleResult, Trips;

    GetContext => "getContext", OptionalUnary, SingleResult, ContextSearch;
    SearchPlaces => "searchPlaces", Unary, SingleResult, ContextSearch;
    SearchGeofences => "searchGeofences", Unary, SingleResult, ContextSearch;
    Autocomplete => "autocomplete", Unary, SingleResult, ContextSearch;

    Geocode => "geocode", Unary, SingleResult, Geocoding;
    ReverseGeocode => "reverseGeocode", OptionalUnary, SingleResult, Geocoding;
    IpGeocode => "ipGeocode", Nullary, SingleResult, Geocoding;

    GetDistance => "getDistance", Unary, SingleResult, Routing;
    GetMatrix => "getMatrix", Unary, SingleResult, Routing;

    SetForegroundServiceOptions => "setForegroundServiceOptions", Unary, SingleResult, PlatformConfig;
    SetLogLevel => "setLogLevel", Unary, SingleResult, PlatformConfig;
    SendEvent => "sendEvent", Unary, SingleResult, PlatformConfig;
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.name() == s)
            .ok_or_else(|| RadarError::UnknownAction(s.to_owned()))
    }
}

/// Continuous notification producers on the native side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stream {
    /// Geofence, place, and trip events together with the updated user.
    Events,
    /// Server-confirmed location updates.
    Location,
    /// Raw device location updates, before any server round trip.
    ClientLocation,
    /// Asynchronous SDK error statuses.
    Errors,
}

impl Stream {
    pub const ALL: [Stream; 4] = [
        Stream::Events,
        Stream::Location,
        Stream::ClientLocation,
        Stream::Errors,
    ];

    /// Action that registers handlers for this stream.
    pub const fn subscribe_action(self) -> Action {
        match self {
            Self::Events => Action::OnEvents,
            Self::Location => Action::OnLocation,
            Self::ClientLocation => Action::OnClientLocation,
            Self::Errors => Action::OnError,
        }
    }

    /// Action that tears the stream's registration down.
    pub const fn teardown_action(self) -> Action {
        match self {
            Self::Events => Action::OffEvents,
            Self::Location => Action::OffLocation,
            Self::ClientLocation => Action::OffClientLocation,
            Self::Errors => Action::OffError,
        }
    }

    /// Reverse lookup from either a subscribe or a teardown action.
    pub fn for_action(action: Action) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.subscribe_action() == action || s.teardown_action() == action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_covers_the_full_plugin_surface() {
        assert_eq!(Action::ALL.len(), 47);
        let names: HashSet<_> = Action::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), Action::ALL.len(), "wire names must be unique");
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), *action);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "startTrackingTurbo".parse::<Action>().unwrap_err();
        assert!(matches!(err, RadarError::UnknownAction(name) if name == "startTrackingTurbo"));
    }

    #[test]
    fn only_on_actions_are_streams() {
        let streams: Vec<_> = Action::ALL
            .iter()
            .filter(|a| a.shape() == Shape::EventStream)
            .map(|a| a.name())
            .collect();
        assert_eq!(
            streams,
            vec!["onEvents", "onLocation", "onClientLocation", "onError"]
        );
        for stream in Stream::ALL {
            assert_eq!(stream.teardown_action().shape(), Shape::SingleResult);
            assert_eq!(stream.subscribe_action().arity(), Arity::Nullary);
        }
    }

    #[test]
    fn teardown_actions_are_distinct() {
        assert_ne!(
            Stream::Errors.teardown_action(),
            Stream::Events.teardown_action()
        );
        assert_eq!(Stream::Errors.teardown_action().name(), "offError");
    }

    #[test]
    fn stream_lookup_from_either_side() {
        assert_eq!(Stream::for_action(Action::OnLocation), Some(Stream::Location));
        assert_eq!(
            Stream::for_action(Action::OffClientLocation),
            Some(Stream::ClientLocation)
        );
        assert_eq!(Stream::for_action(Action::GetUserId), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Action::StartTrackingCustom).unwrap();
        assert_eq!(json, "\"startTrackingCustom\"");
        let back: Action = serde_json::from_str("\"ipGeocode\"").unwrap();
        assert_eq!(back, Action::IpGeocode);
    }

    #[test]
    fn arity_bounds() {
        assert!(Arity::Nullary.accepts(0));
        assert!(!Arity::Nullary.accepts(1));
        assert!(Arity::Unary.accepts(1));
        assert!(!Arity::Unary.accepts(0));
        assert!(Arity::OptionalUnary.accepts(0));
        assert!(Arity::OptionalUnary.accepts(1));
        assert!(!Arity::OptionalUnary.accepts(2));
    }
}
