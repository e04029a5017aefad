use crate::scheduler::TickFlag;

/// Creates the frame-due flag for use in `static` position, shared between
/// the timer ISR and the main loop.
///
/// # Example
/// ```rust
/// use cdtv_ir::scheduler::TickFlag;
/// use cdtv_ir::timer::global_tick_flag_init;
///
/// static FRAME_TICK: TickFlag = global_tick_flag_init();
/// ```
pub const fn global_tick_flag_init() -> TickFlag {
    TickFlag::new()
}

/// Marks a frame as due from a timer interrupt handler.
///
/// This is the whole of the ISR's job: no I/O, no blocking, no lengthy
/// work. The main loop picks the flag up via
/// [`CdtvDriver::service_if_due`](crate::driver::CdtvDriver::service_if_due).
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIMER_IRQ_0() {
///     global_frame_tick(&FRAME_TICK);
/// }
/// ```
pub fn global_frame_tick(flag: &'static TickFlag) {
    flag.raise();
}
