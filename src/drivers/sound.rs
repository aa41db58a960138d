// ClapTrace — Analog Sound Sensor Driver
//
// Microphone module on ADC1, one-shot reads via raw ESP-IDF calls.
// GPIO2 / ADC1_CHANNEL_2 with 11 dB attenuation (0–3.3 V range).

use esp_idf_sys::{self as sys, esp};

use crate::config::*;

const SOUND_ADC_CHANNEL: sys::adc_channel_t = sys::adc_channel_t_ADC_CHANNEL_2; // GPIO2

pub struct SoundSensor {
    handle: sys::adc_oneshot_unit_handle_t,
}

impl SoundSensor {
    /// Bring up the ADC unit and configure the sound channel (12-bit).
    pub fn new() -> anyhow::Result<Self> {
        let mut handle: sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();

        unsafe {
            let unit_cfg = sys::adc_oneshot_unit_init_cfg_t {
                unit_id: sys::adc_unit_t_ADC_UNIT_1,
                ulp_mode: sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..core::mem::zeroed()
            };
            esp!(sys::adc_oneshot_new_unit(&unit_cfg, &mut handle))?;

            let chan_cfg = sys::adc_oneshot_chan_cfg_t {
                atten: sys::adc_atten_t_ADC_ATTEN_DB_11,
                bitwidth: sys::adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            esp!(sys::adc_oneshot_config_channel(
                handle,
                SOUND_ADC_CHANNEL,
                &chan_cfg
            ))?;
        }

        Ok(Self { handle })
    }

    /// Instantaneous sound level in native ADC counts (0–4095).
    pub fn read_level(&mut self) -> anyhow::Result<u16> {
        let mut raw: i32 = 0;
        esp!(unsafe { sys::adc_oneshot_read(self.handle, SOUND_ADC_CHANNEL, &mut raw) })?;
        Ok(raw.clamp(0, ADC_FULL_SCALE as i32) as u16)
    }
}
