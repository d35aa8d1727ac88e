use std::time::Duration;

use http::Method;

use crate::models::machine::{door_control_body, ErrorMessageRequest, DEFAULT_DOOR_TIMEOUT};
use crate::{CashPointClient, DoorStates, Endpoint, Envelope};

/// Machine information, door locks, sensors and device status.
#[derive(Debug, Clone, Copy)]
pub struct MachineApi<'a> {
    client: &'a CashPointClient,
}

impl<'a> MachineApi<'a> {
    pub(crate) fn new(client: &'a CashPointClient) -> Self {
        Self { client }
    }

    /// Device id, door states and other machine details. See
    /// [`MachineInfo`](crate::MachineInfo).
    pub async fn get_machine_info(&self) -> Envelope {
        self.client.send(Method::GET, Endpoint::MachineInfo, None::<&()>).await
    }

    /// Sets door locks. Doors opened here relock after `timeout`
    /// (10 seconds when `None`).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use cashpoint_client::{CashPointClient, DoorState, DoorStates, NOTE_SECURITY_DOOR};
    /// # async fn example(client: &CashPointClient) {
    /// let mut doors = DoorStates::new();
    /// doors.insert(NOTE_SECURITY_DOOR.to_string(), DoorState::Open);
    /// let envelope = client.machine().door_control(&doors, None).await;
    /// # }
    /// ```
    pub async fn door_control(&self, door_states: &DoorStates, timeout: Option<Duration>) -> Envelope {
        let body = door_control_body(door_states, timeout.unwrap_or(DEFAULT_DOOR_TIMEOUT));
        self.client.send(Method::POST, Endpoint::DoorControl, Some(&body)).await
    }

    pub async fn get_sensor_status(&self) -> Envelope {
        self.client.send(Method::GET, Endpoint::SensorStatus, None::<&()>).await
    }

    pub async fn get_cassette_status(&self) -> Envelope {
        self.client.send(Method::GET, Endpoint::CassetteStatus, None::<&()>).await
    }

    /// Overall device status. See [`SystemStatus`](crate::SystemStatus).
    pub async fn get_status(&self) -> Envelope {
        self.client.send(Method::GET, Endpoint::GetStatus, None::<&()>).await
    }

    /// Returns the device to standby.
    pub async fn reset_status(&self) -> Envelope {
        self.client.send(Method::GET, Endpoint::ResetStatus, None::<&()>).await
    }

    /// Asks the device to describe one of its error codes.
    pub async fn get_error_message(&self, error_code: &str) -> Envelope {
        self.client
            .send(Method::POST, Endpoint::GetErrorMessage, Some(&ErrorMessageRequest { error_code }))
            .await
    }
}
