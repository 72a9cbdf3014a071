// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Named entry points for every Radar plugin action.
//
// Each method is a fixed-arity specialisation of `ActionDispatcher::invoke`
// or `ActionDispatcher::subscribe`, generated from the tables below. Parameters
// are forwarded in declared order; an omitted optional parameter produces an
// empty argument list.

use std::sync::Arc;

use radar_core::action::{Action, Stream};
use radar_core::error::Result;
use radar_core::types::{DesiredAccuracy, LogLevel, Payload};

use crate::dispatcher::{ActionDispatcher, Deferred};
use crate::traits::NativeChannel;

/// Typed client for the Radar location plugin.
#[derive(Clone)]
pub struct Radar {
    dispatcher: ActionDispatcher,
}

impl Radar {
    pub fn new(dispatcher: ActionDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Client over `channel` with the default configuration.
    pub fn with_channel(channel: Arc<dyn NativeChannel>) -> Self {
        Self::new(ActionDispatcher::with_channel(channel))
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }
}

macro_rules! single_result {
    ($( $(#[$doc:meta])* fn $method:ident($($param:ident: $ty:ty),*) => $action:ident; )*) => {
        impl Radar {
            $(
                $(#[$doc])*
                pub fn $method(&self $(, $param: $ty)*) -> Deferred {
                    self.dispatcher
                        .invoke(Action::$action, vec![$(Payload::from($param)),*])
                }
            )*
        }
    };
}

macro_rules! optional_argument {
    ($( $(#[$doc:meta])* fn $method:ident($param:ident: Option<$ty:ty>) => $action:ident; )*) => {
        impl Radar {
            $(
                $(#[$doc])*
                pub fn $method(&self, $param: Option<$ty>) -> Deferred {
                    let args = $param.map(Payload::from).into_iter().collect();
                    self.dispatcher.invoke(Action::$action, args)
                }
            )*
        }
    };
}

macro_rules! event_stream {
    ($( $(#[$doc:meta])* fn $method:ident => $stream:ident; )*) => {
        impl Radar {
            $(
                $(#[$doc])*
                pub fn $method<D, E>(&self, on_data: D, on_error: E) -> Result<()>
                where
                    D: FnMut(Payload) + Send + 'static,
                    E: FnMut(Payload) + Send + 'static,
                {
                    self.dispatcher.subscribe(Stream::$stream, on_data, on_error)
                }
            )*
        }
    };
}

single_result! {
    /// Initialize the SDK with a publishable key.
    fn initialize(publishable_key: &str) => Initialize;
    fn set_user_id(user_id: &str) => SetUserId;
    fn get_user_id() => GetUserId;
    fn set_description(description: &str) => SetDescription;
    fn get_description() => GetDescription;
    /// Replace the custom metadata object stored on the user.
    fn set_metadata(metadata: Payload) => SetMetadata;
    fn get_metadata() => GetMetadata;

    /// When enabled, only the minimum data needed for tracking is sent and
    /// no user identity is stored server-side.
    fn set_anonymous_tracking_enabled(enabled: bool) => SetAnonymousTrackingEnabled;
    fn set_ad_id_enabled(enabled: bool) => SetAdIdEnabled;

    /// Resolves with a status string; see `PermissionsStatus`.
    fn get_permissions_status() => GetPermissionsStatus;
    fn request_permissions(background: bool) => RequestPermissions;
    /// Resolves once the user has answered the permission prompt.
    fn request_permissions_sync(background: bool) => RequestPermissionsSync;

    fn get_tracking_options() => GetTrackingOptions;
    fn is_tracking() => IsTracking;

    fn start_tracking_efficient() => StartTrackingEfficient;
    fn start_tracking_responsive() => StartTrackingResponsive;
    fn start_tracking_continuous() => StartTrackingContinuous;
    /// Start tracking with a full tracking options object.
    fn start_tracking_custom(options: Payload) => StartTrackingCustom;
    /// Simulate a trip between `origin` and `destination` (see native docs
    /// for the options object).
    fn mock_tracking(options: Payload) => MockTracking;
    fn stop_tracking() => StopTracking;

    fn off_events() => OffEvents;
    fn off_location() => OffLocation;
    fn off_client_location() => OffClientLocation;
    /// Tear down the error stream. Which native action this reaches depends
    /// on `BridgeConfig::off_error_routing`.
    fn off_error() => OffError;

    /// Resolves with the current trip options, or null when no trip is active.
    fn get_trip_options() => GetTripOptions;
    fn start_trip(options: Payload) => StartTrip;
    fn update_trip(options: Payload) => UpdateTrip;
    fn complete_trip() => CompleteTrip;
    fn cancel_trip() => CancelTrip;

    fn search_places(options: Payload) => SearchPlaces;
    fn search_geofences(options: Payload) => SearchGeofences;
    fn autocomplete(options: Payload) => Autocomplete;

    /// Forward-geocode an address query.
    fn geocode(query: &str) => Geocode;
    fn ip_geocode() => IpGeocode;

    fn get_distance(options: Payload) => GetDistance;
    fn get_matrix(options: Payload) => GetMatrix;

    /// Android only: notification settings for the tracking foreground service.
    fn set_foreground_service_options(options: Payload) => SetForegroundServiceOptions;
    fn set_log_level(level: LogLevel) => SetLogLevel;
    /// Log a custom conversion event.
    fn send_event(options: Payload) => SendEvent;
}

optional_argument! {
    /// Fetch the device location once, without sending it to the server.
    fn get_location(desired_accuracy: Option<DesiredAccuracy>) => GetLocation;
    /// Track once, either from the device or from a caller-supplied location
    /// inside `options`.
    fn track_once(options: Option<Payload>) => TrackOnce;
    /// Context (geofences, place, region) for `location`, or for the device
    /// location when omitted.
    fn get_context(location: Option<Payload>) => GetContext;
    fn reverse_geocode(location: Option<Payload>) => ReverseGeocode;
}

event_stream! {
    /// Geofence, place, and trip events as the server generates them.
    fn on_events => Events;
    /// Server-confirmed location updates.
    fn on_location => Location;
    /// Raw device location updates.
    fn on_client_location => ClientLocation;
    /// Asynchronous SDK error statuses.
    fn on_error => Errors;
}
