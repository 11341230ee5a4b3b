//! Opens a window that clears to a color cycling over time. Escape closes it,
//! the left mouse button toggles the animation.

#[cfg(target_os = "windows")]
fn main() {
    use dxshell::{ButtonState, Config, DisplayMode, MouseButton, Shell};

    dxshell::logging::init();

    let mut shell = Shell::new(Config::from_env().with_args(std::env::args()));
    shell.init_display_mode(DisplayMode::DOUBLE | DisplayMode::MULTISAMPLE);

    if let Err(err) = shell.create_window("dxshell") {
        log::error!("{err}");
        return;
    }

    shell.display_func(|shell| {
        let t = shell.elapsed_ms() as f32 / 1000.0;
        let color = [0.5 + 0.5 * t.sin(), 0.3, 0.5 + 0.5 * t.cos(), 1.0];

        if let Some(target) = shell.platform().render_target() {
            unsafe {
                shell
                    .platform()
                    .context()
                    .ClearRenderTargetView(target, color.as_ptr());
            }
        }
        shell.swap_buffers();
    });

    shell.reshape_func(|_, extent| {
        log::info!("resized to {}x{}", extent.width, extent.height);
    });

    shell.keyboard_func(|shell, key, _| {
        if key == 0x1B {
            if let Some(window) = shell.window() {
                shell.destroy_window(window);
            }
        }
    });

    let mut animating = true;
    shell.idle_func(|shell| shell.post_redisplay());
    shell.mouse_func(move |shell, button, state, _| {
        if button == MouseButton::Left && state == ButtonState::Pressed {
            animating = !animating;
            if animating {
                shell.idle_func(|shell| shell.post_redisplay());
            } else {
                shell.clear_idle_func();
            }
        }
    });

    shell.main_loop();
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("this example requires Windows");
}
