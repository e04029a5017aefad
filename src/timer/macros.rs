/// Declares a `static` frame-due flag named `FRAME_TICK`.
///
/// The flag is the only state shared between the timer interrupt and the
/// main loop; declare it once at module scope in the firmware crate.
///
/// # Example
/// ```rust,ignore
/// init_frame_tick!();
/// ```
#[macro_export]
macro_rules! init_frame_tick {
    () => {
        pub static FRAME_TICK: $crate::scheduler::TickFlag = $crate::scheduler::TickFlag::new();
    };
}

/// Marks a frame as due. Call from the repeating-timer interrupt handler,
/// and nothing else from there.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIMER_IRQ_0() {
///     raise_frame_tick!();
/// }
/// ```
///
/// # Notes
/// - Assumes `FRAME_TICK` was declared with `init_frame_tick!`.
/// - Safe at any point, including while a frame is mid-transmission.
#[macro_export]
macro_rules! raise_frame_tick {
    () => {
        FRAME_TICK.raise();
    };
}

/// Services the driver against the declared `FRAME_TICK` flag. Call from
/// the main loop after waking.
///
/// # Example
/// ```rust,ignore
/// loop {
///     cortex_m::asm::wfi();
///     service_frame!(driver)?;
/// }
/// ```
#[macro_export]
macro_rules! service_frame {
    ( $driver:expr ) => {
        $driver.service_if_due(&FRAME_TICK)
    };
}
