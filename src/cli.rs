//! Command-line parsing and dispatch for the `uinputctl` binary.

use crate::device::InputDevice;
use crate::error::Error;
use crate::key::{KeyAction, send_key};
use crate::touch::{ScreenPoint, ScreenScale, send_screen_touch, send_touch};
use std::path::PathBuf;
use thiserror::Error;

/// Usage text printed on `--help` and on argument errors.
pub const USAGE: &str = "\
usage: uinputctl [options] <command> [args...]
commands:
  device-key <device> <keycode> [down|up|tap] - send key event to existing device (tap if omitted)
  device-touch <device> <x> <y>               - send touch event to existing device (raw device coordinates)
  screen-touch <device> <x> <y>               - send touch event to existing device (screen coordinates)
  virtual-touch <x> <y>                       - send touch event to a new uinput touchscreen (feature `uinput`)
options:
  --scale-x <n>   screen to device factor for x (default 60, env UINPUTCTL_SCALE_X)
  --scale-y <n>   screen to device factor for y (default 33, env UINPUTCTL_SCALE_Y)
  -h, --help      print this help
examples:
  uinputctl device-key /dev/input/event5 30 down
  uinputctl device-touch /dev/input/event5 2048 1394
  uinputctl screen-touch /dev/input/event5 40 40
";

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Touch at raw device coordinates.
    DeviceTouch { device: PathBuf, x: i32, y: i32 },
    /// Touch at screen coordinates.
    ScreenTouch { device: PathBuf, point: ScreenPoint },
    /// Key event by raw evdev code.
    DeviceKey {
        device: PathBuf,
        code: u16,
        action: KeyAction,
    },
    /// Touch on a freshly created uinput touchscreen.
    VirtualTouch { x: i32, y: i32 },
    /// Print usage.
    Help,
}

/// A command plus the options that apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub scale: ScreenScale,
    pub command: Command,
}

/// Errors reported by the command line, split by exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad or missing arguments. Nothing was opened.
    #[error("{0}")]
    Usage(String),

    /// The command ran and failed.
    #[error("{context}: {source}")]
    Runtime {
        context: &'static str,
        #[source]
        source: Error,
    },
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Runtime { .. } => 1,
        }
    }
}

fn runtime(context: &'static str) -> impl FnOnce(Error) -> CliError {
    move |source| CliError::Runtime { context, source }
}

fn parse_int<T: std::str::FromStr>(what: &str, raw: &str) -> Result<T, CliError> {
    raw.parse()
        .map_err(|_| CliError::Usage(format!("invalid {what}: {raw:?}")))
}

/// Parse arguments (without the program name).
///
/// `scale` is the starting scale, usually from [`ScreenScale::from_env`];
/// `--scale-x`/`--scale-y` override it.
pub fn parse<I, S>(args: I, mut scale: ScreenScale) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);

    let command = loop {
        let Some(arg) = args.next() else {
            return Err(CliError::Usage("missing command".into()));
        };
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "-h" | "--help" => {
                return Ok(Invocation {
                    scale,
                    command: Command::Help,
                });
            }
            "--scale-x" | "--scale-y" => {
                let value = inline
                    .or_else(|| args.next())
                    .ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))?;
                let factor = parse_int(&flag, &value)?;
                if flag == "--scale-x" {
                    scale.x = factor;
                } else {
                    scale.y = factor;
                }
            }
            _ if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option: {flag}")));
            }
            _ => break arg,
        }
    };

    let rest: Vec<String> = args.collect();
    let need = |n: usize| -> Result<(), CliError> {
        if rest.len() < n {
            Err(CliError::Usage(format!("{command}: missing arguments")))
        } else {
            Ok(())
        }
    };

    let command = match command.as_str() {
        "device-touch" => {
            need(3)?;
            Command::DeviceTouch {
                device: PathBuf::from(&rest[0]),
                x: parse_int("x coordinate", &rest[1])?,
                y: parse_int("y coordinate", &rest[2])?,
            }
        }
        "screen-touch" => {
            need(3)?;
            Command::ScreenTouch {
                device: PathBuf::from(&rest[0]),
                point: ScreenPoint {
                    x: parse_int("x coordinate", &rest[1])?,
                    y: parse_int("y coordinate", &rest[2])?,
                },
            }
        }
        "device-key" => {
            need(2)?;
            let action = match rest.get(2) {
                Some(raw) => raw
                    .parse()
                    .map_err(|e: Error| CliError::Usage(e.to_string()))?,
                None => KeyAction::Tap,
            };
            Command::DeviceKey {
                device: PathBuf::from(&rest[0]),
                code: parse_int("keycode", &rest[1])?,
                action,
            }
        }
        "virtual-touch" => {
            need(2)?;
            Command::VirtualTouch {
                x: parse_int("x coordinate", &rest[0])?,
                y: parse_int("y coordinate", &rest[1])?,
            }
        }
        other => return Err(CliError::Usage(format!("unknown command: {other}"))),
    };

    Ok(Invocation { scale, command })
}

/// Run a parsed invocation, printing confirmations to stdout.
pub fn run(invocation: &Invocation) -> Result<(), CliError> {
    match &invocation.command {
        Command::Help => print!("{USAGE}"),
        Command::DeviceTouch { device, x, y } => {
            let mut dev = InputDevice::open(device).map_err(runtime("open device"))?;
            send_touch(&mut dev, *x, *y).map_err(runtime("send touch"))?;
            dev.close().map_err(runtime("close device"))?;
            println!("touch sent to {}", device.display());
        }
        Command::ScreenTouch { device, point } => {
            let target = invocation.scale.apply(*point);
            println!("Screen coordinates {point} -> Device coordinates {target}");

            let mut dev = InputDevice::open(device).map_err(runtime("open device"))?;
            send_screen_touch(&mut dev, &invocation.scale, *point)
                .map_err(runtime("send touch"))?;
            dev.close().map_err(runtime("close device"))?;
            println!("screen touch sent to {}", device.display());
        }
        Command::DeviceKey {
            device,
            code,
            action,
        } => {
            let mut dev = InputDevice::open(device).map_err(runtime("open device"))?;
            send_key(&mut dev, *code, *action).map_err(runtime("send key"))?;
            dev.close().map_err(runtime("close device"))?;
            println!("key {code} {action} sent to {}", device.display());
        }
        Command::VirtualTouch { x, y } => run_virtual_touch(*x, *y)?,
    }
    Ok(())
}

#[cfg(feature = "uinput")]
fn run_virtual_touch(x: i32, y: i32) -> Result<(), CliError> {
    use crate::uinput::{AxisRange, DEFAULT_NAME, VirtualTouchscreen};

    let mut dev = VirtualTouchscreen::create(DEFAULT_NAME, AxisRange::default())
        .map_err(runtime("create virtual device"))?;
    send_touch(&mut dev, x, y).map_err(runtime("send touch"))?;
    println!("touch sent to virtual device {DEFAULT_NAME:?}");
    Ok(())
}

#[cfg(not(feature = "uinput"))]
fn run_virtual_touch(_x: i32, _y: i32) -> Result<(), CliError> {
    Err(CliError::Runtime {
        context: "virtual-touch",
        source: Error::VirtualDevice("built without the `uinput` feature".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(args: &[&str]) -> Invocation {
        parse(args.iter().copied(), ScreenScale::default()).unwrap()
    }

    fn parse_err(args: &[&str]) -> CliError {
        parse(args.iter().copied(), ScreenScale::default()).unwrap_err()
    }

    #[test]
    fn test_device_touch() {
        let inv = parse_ok(&["device-touch", "/dev/input/event5", "2048", "1394"]);
        assert_eq!(
            inv.command,
            Command::DeviceTouch {
                device: "/dev/input/event5".into(),
                x: 2048,
                y: 1394
            }
        );
        assert_eq!(inv.scale, ScreenScale::default());
    }

    #[test]
    fn test_negative_coordinates_are_positional() {
        let inv = parse_ok(&["screen-touch", "/dev/input/event5", "-4", "-1"]);
        assert_eq!(
            inv.command,
            Command::ScreenTouch {
                device: "/dev/input/event5".into(),
                point: ScreenPoint { x: -4, y: -1 }
            }
        );
    }

    #[test]
    fn test_scale_options() {
        let inv = parse_ok(&[
            "--scale-x",
            "10",
            "--scale-y=20",
            "screen-touch",
            "/dev/null",
            "1",
            "1",
        ]);
        assert_eq!(inv.scale, ScreenScale { x: 10, y: 20 });
    }

    #[test]
    fn test_device_key_actions() {
        let inv = parse_ok(&["device-key", "/dev/input/event5", "30", "down"]);
        assert_eq!(
            inv.command,
            Command::DeviceKey {
                device: "/dev/input/event5".into(),
                code: 30,
                action: KeyAction::Down
            }
        );
        let inv = parse_ok(&["device-key", "/dev/input/event5", "30"]);
        assert!(matches!(
            inv.command,
            Command::DeviceKey {
                action: KeyAction::Tap,
                ..
            }
        ));
        let inv = parse_ok(&["device-key", "/dev/input/event5", "30", "tap"]);
        assert!(matches!(
            inv.command,
            Command::DeviceKey {
                action: KeyAction::Tap,
                ..
            }
        ));
        assert_eq!(parse_err(&["device-key", "/dev/x", "30", "sideways"]).exit_code(), 2);
        assert!(USAGE.contains("[down|up|tap]"));
    }

    #[test]
    fn test_usage_errors() {
        for args in [
            &[][..],
            &["device-touch", "/dev/input/event5"][..],
            &["screen-touch", "/dev/input/event5", "40"][..],
            &["device-touch", "/dev/input/event5", "x", "1"][..],
            &["device-touch", "/dev/input/event5", "1", "99999999999"][..],
            &["device-key", "/dev/input/event5", "-1"][..],
            &["launch-missiles"][..],
            &["--scale-x"][..],
            &["--verbose", "device-touch", "/dev/null", "1", "1"][..],
        ] {
            let err = parse_err(args);
            assert!(matches!(err, CliError::Usage(_)), "{args:?}: {err:?}");
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_ok(&["--help"]).command, Command::Help);
        assert_eq!(parse_ok(&["-h", "device-touch"]).command, Command::Help);
    }

    #[test]
    fn test_runtime_error_exit_code() {
        let inv = parse_ok(&["device-touch", "/nonexistent/event5", "1", "1"]);
        let err = run(&inv).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().starts_with("open device: "));
    }
}
