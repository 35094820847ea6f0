use std::ffi::c_void;
use std::sync::OnceLock;

use windows::Win32::Foundation::{FILETIME, HANDLE, HMODULE};
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};
use windows::core::{PCSTR, s, w};

use crate::core::{FILETIME_EPOCH_OFFSET_NS, NS_PER_TICK, TimeError, TimeResult, Timestamp};

type GetSystemTimePreciseAsFileTimeFn = unsafe extern "system" fn(*mut FILETIME);

type CreateWaitableTimerExWFn =
    unsafe extern "system" fn(*const c_void, *const u16, u32, u32) -> HANDLE;

type SetWaitableTimerExFn = unsafe extern "system" fn(
    HANDLE,
    *const i64,
    i32,
    *const c_void,
    *const c_void,
    *const c_void,
    u32,
) -> i32;

/// The kernel32 entry points this crate depends on, resolved once.
///
/// `GetSystemTimePreciseAsFileTime` appeared in Windows 8 and the waitable
/// timer entry points must be looked up dynamically rather than linked, so a
/// missing symbol surfaces as a probe failure instead of a loader error.
/// Resolution happens at most once per process; the result is immutable.
#[derive(Clone, Copy)]
pub struct Capabilities {
    get_precise_time: GetSystemTimePreciseAsFileTimeFn,
    create_waitable_timer: CreateWaitableTimerExWFn,
    set_waitable_timer: SetWaitableTimerExFn,
}

impl Capabilities {
    fn probe() -> TimeResult<Self> {
        let kernel32 = unsafe { GetModuleHandleW(w!("kernel32.dll")) }.map_err(|e| {
            TimeError::CapabilityUnavailable(format!("kernel32.dll handle unavailable: {}", e))
        })?;

        let caps = unsafe {
            Self {
                get_precise_time: std::mem::transmute::<RawSymbol, GetSystemTimePreciseAsFileTimeFn>(
                    resolve(kernel32, s!("GetSystemTimePreciseAsFileTime"))?,
                ),
                create_waitable_timer: std::mem::transmute::<RawSymbol, CreateWaitableTimerExWFn>(
                    resolve(kernel32, s!("CreateWaitableTimerExW"))?,
                ),
                set_waitable_timer: std::mem::transmute::<RawSymbol, SetWaitableTimerExFn>(
                    resolve(kernel32, s!("SetWaitableTimerEx"))?,
                ),
            }
        };

        tracing::debug!("resolved precise time and waitable timer entry points");
        Ok(caps)
    }

    /// Current wall-clock time in nanoseconds since the Unix epoch.
    ///
    /// `GetSystemTimePreciseAsFileTime` is defined never to fail once
    /// resolved, so there is no error path here.
    pub fn now_ns(&self) -> Timestamp {
        let mut filetime = FILETIME::default();
        unsafe { (self.get_precise_time)(&mut filetime) };

        let ticks = ((filetime.dwHighDateTime as u64) << 32) | filetime.dwLowDateTime as u64;
        ticks * NS_PER_TICK - FILETIME_EPOCH_OFFSET_NS
    }

    pub(crate) fn create_timer(&self, flags: u32, desired_access: u32) -> HANDLE {
        unsafe {
            (self.create_waitable_timer)(
                std::ptr::null(),
                std::ptr::null(),
                flags,
                desired_access,
            )
        }
    }

    pub(crate) fn arm_timer(&self, timer: HANDLE, due_ticks: i64) -> bool {
        // One-shot (zero period), no completion routine, no wake context,
        // zero coalescing tolerance.
        let rc = unsafe {
            (self.set_waitable_timer)(
                timer,
                &due_ticks,
                0,
                std::ptr::null(),
                std::ptr::null(),
                std::ptr::null(),
                0,
            )
        };
        rc != 0
    }
}

type RawSymbol = unsafe extern "system" fn() -> isize;

fn resolve(module: HMODULE, name: PCSTR) -> TimeResult<RawSymbol> {
    unsafe { GetProcAddress(module, name) }.ok_or_else(|| {
        TimeError::CapabilityUnavailable(format!(
            "{} is not exported by kernel32.dll on this Windows version",
            unsafe { name.display() }
        ))
    })
}

static CAPABILITIES: OnceLock<TimeResult<Capabilities>> = OnceLock::new();

/// Resolved OS entry points, probing them on first use.
pub fn capabilities() -> TimeResult<&'static Capabilities> {
    match CAPABILITIES.get_or_init(Capabilities::probe) {
        Ok(caps) => Ok(caps),
        Err(e) => Err(e.clone()),
    }
}

/// Force capability probing up front. Idempotent; later calls are free.
pub fn init() -> TimeResult<()> {
    capabilities().map(|_| ())
}

pub(crate) fn last_os_error() -> u32 {
    win32_code(&windows::core::Error::from_thread())
}

// HRESULTs from Win32 failures carry the original error code in the low word.
pub(crate) fn win32_code(e: &windows::core::Error) -> u32 {
    (e.code().0 & 0xFFFF) as u32
}
