// GUI-subsystem binary: Windows never allocates a console for it.
// In --print mode we attach to the launching terminal and reopen CONOUT$ so
// println!/eprintln! reach it.
#![windows_subsystem = "windows"]

use std::process::ExitCode;

use clap::Parser;
use cudaviz::app::CudaVizApp;
use cudaviz::cli::CliArgs;
use cudaviz::{i18n, log_info, logger};
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    let args = CliArgs::parse();

    // -- Headless export ---------------------------------------------------
    if args.is_headless() {
        #[cfg(target_os = "windows")]
        attach_parent_console();

        i18n::init();
        let code = cudaviz::cli::run(args);
        std::process::exit(if code == ExitCode::SUCCESS { 0 } else { 1 });
    }

    // -- GUI mode ------------------------------------------------------------
    logger::init();
    i18n::init();

    let session = args.session();
    let language = args.language.clone();
    log_info!("Starting GUI");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("CUDA Visualizer"),
        ..Default::default()
    };

    eframe::run_native(
        "CudaViz",
        options,
        Box::new(move |cc| Box::new(CudaVizApp::new(cc, session, language))),
    )
}

/// Route stdout/stderr to the terminal that launched us so `--print` output
/// and export errors show up there. Headless mode never reads stdin, so only
/// the output handles are rebound.
#[cfg(target_os = "windows")]
fn attach_parent_console() {
    unsafe extern "system" {
        fn AttachConsole(dwProcessId: u32) -> i32;
        fn SetStdHandle(nStdHandle: u32, hHandle: isize) -> i32;
        fn CreateFileW(
            lpFileName: *const u16,
            dwDesiredAccess: u32,
            dwShareMode: u32,
            lpSecurityAttributes: *const std::ffi::c_void,
            dwCreationDisposition: u32,
            dwFlagsAndAttributes: u32,
            hTemplateFile: isize,
        ) -> isize;
    }
    const ATTACH_PARENT_PROCESS: u32 = 0xFFFF_FFFF;
    const GENERIC_WRITE: u32 = 0x4000_0000;
    const FILE_SHARE_READ_WRITE: u32 = 0x0000_0003;
    const OPEN_EXISTING: u32 = 3;
    const STD_OUTPUT_HANDLE: u32 = 0xFFFF_FFF5_u32; // -11
    const STD_ERROR_HANDLE: u32 = 0xFFFF_FFF4_u32; // -12
    const INVALID_HANDLE_VALUE: isize = -1;

    let conout: Vec<u16> = "CONOUT$\0".encode_utf16().collect();
    unsafe {
        if AttachConsole(ATTACH_PARENT_PROCESS) == 0 {
            return;
        }
        let hout = CreateFileW(
            conout.as_ptr(),
            GENERIC_WRITE,
            FILE_SHARE_READ_WRITE,
            std::ptr::null(),
            OPEN_EXISTING,
            0,
            0,
        );
        if hout != INVALID_HANDLE_VALUE {
            SetStdHandle(STD_OUTPUT_HANDLE, hout);
            SetStdHandle(STD_ERROR_HANDLE, hout);
        }
    }
}
