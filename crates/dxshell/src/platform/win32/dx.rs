use windows::Win32::{
    Foundation::HMODULE,
    Graphics::{
        Direct3D::{
            D3D_DRIVER_TYPE_HARDWARE, D3D_FEATURE_LEVEL, D3D_FEATURE_LEVEL_10_0,
            D3D_FEATURE_LEVEL_10_1, D3D_FEATURE_LEVEL_11_0,
        },
        Direct3D11::{
            D3D11CreateDevice, ID3D11Device, ID3D11DeviceContext, D3D11_CREATE_DEVICE_DEBUG,
            D3D11_CREATE_DEVICE_FLAG, D3D11_MAX_MULTISAMPLE_SAMPLE_COUNT, D3D11_SDK_VERSION,
        },
        Dxgi::{Common::DXGI_FORMAT, IDXGIAdapter},
    },
};

use crate::{config::Config, error::fatal};

const FEATURE_LEVELS: [D3D_FEATURE_LEVEL; 3] = [
    D3D_FEATURE_LEVEL_11_0,
    D3D_FEATURE_LEVEL_10_1,
    D3D_FEATURE_LEVEL_10_0,
];

pub struct Interfaces {
    pub device: ID3D11Device,
    pub context: ID3D11DeviceContext,
}

impl Interfaces {
    /// Creates a hardware device on the default adapter, along with its
    /// immediate context. Aborts if no device can be created.
    pub fn new(config: &Config) -> Self {
        let flags = if config.debug_mode {
            D3D11_CREATE_DEVICE_DEBUG
        } else {
            D3D11_CREATE_DEVICE_FLAG(0)
        };

        let mut device = None;
        let mut context = None;
        let mut feature_level = D3D_FEATURE_LEVEL::default();

        let created = unsafe {
            D3D11CreateDevice(
                None::<&IDXGIAdapter>,
                D3D_DRIVER_TYPE_HARDWARE,
                HMODULE::default(),
                flags,
                Some(&FEATURE_LEVELS),
                D3D11_SDK_VERSION,
                Some(&mut device),
                Some(&mut feature_level),
                Some(&mut context),
            )
        };

        let (device, context) = match (created, device, context) {
            (Ok(()), Some(device), Some(context)) => (device, context),
            (Err(err), _, _) => fatal(format_args!("failed to create Direct3D 11 device: {err}")),
            _ => fatal(format_args!("Direct3D 11 device creation returned no device")),
        };

        log::debug!(
            "created Direct3D 11 device, feature level {:#x}, debug layer {}",
            feature_level.0,
            config.debug_mode
        );

        Self {
            device,
            context,
        }
    }

    /// The sample count and quality to request for a multisampled swap
    /// chain, or single-sampling if the device offers no quality levels.
    pub fn sample_desc(&self, format: DXGI_FORMAT) -> (u32, u32) {
        let count = D3D11_MAX_MULTISAMPLE_SAMPLE_COUNT;
        match unsafe { self.device.CheckMultisampleQualityLevels(format, count) } {
            Ok(levels) if levels > 0 => (count, levels - 1),
            Ok(_) => {
                log::warn!("{count}x multisampling not supported, falling back to single-sampling");
                (1, 0)
            }
            Err(err) => {
                log::warn!("multisample quality query failed ({err}), falling back to single-sampling");
                (1, 0)
            }
        }
    }
}
