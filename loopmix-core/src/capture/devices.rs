use crate::models::error::SessionError;
use crate::models::media::InputDevice;
use crate::traits::media_host::MediaHost;

/// List selectable microphones, substituting placeholder labels where the
/// host reports none.
pub fn list_microphones<H: MediaHost + ?Sized>(
    host: &H,
) -> Result<Vec<InputDevice>, SessionError> {
    let devices = host.enumerate_inputs()?;
    Ok(devices
        .into_iter()
        .enumerate()
        .map(|(index, mut device)| {
            if device.label.trim().is_empty() {
                device.label = format!("Microphone {}", index + 1);
            }
            device
        })
        .collect())
}
