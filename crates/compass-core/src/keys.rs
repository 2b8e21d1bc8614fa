//! CoMPASS parameter key names used by the built-in reports.

/// Channel enable flag (`SRV_PARAM_CH_ENABLED`).
pub const CH_ENABLED: &str = "SRV_PARAM_CH_ENABLED";
/// Analog coarse gain enumeration (`SRV_PARAM_CH_COARSE_GAIN`).
pub const CH_COARSE_GAIN: &str = "SRV_PARAM_CH_COARSE_GAIN";
/// Energy fine gain (`SRV_PARAM_CH_ENERGY_FINE_GAIN`).
pub const CH_ENERGY_FINE_GAIN: &str = "SRV_PARAM_CH_ENERGY_FINE_GAIN";
/// Charge sensitivity enumeration (`SRV_PARAM_CH_ENERGY_COARSE_GAIN`).
pub const CH_ENERGY_COARSE_GAIN: &str = "SRV_PARAM_CH_ENERGY_COARSE_GAIN";
/// Pre-trigger window in ns (`SRV_PARAM_CH_PRETRG`).
pub const CH_PRETRG: &str = "SRV_PARAM_CH_PRETRG";
/// Trigger threshold in ADC counts (`SRV_PARAM_CH_THRESHOLD`).
pub const CH_THRESHOLD: &str = "SRV_PARAM_CH_THRESHOLD";
/// Record length in ns (`SRV_PARAM_RECLEN`).
pub const RECLEN: &str = "SRV_PARAM_RECLEN";
/// Pulse polarity (`SRV_PARAM_CH_POLARITY`).
pub const CH_POLARITY: &str = "SRV_PARAM_CH_POLARITY";
/// Trapezoid rise time in ns (`SRV_PARAM_CH_TRAP_TRISE`).
pub const CH_TRAP_TRISE: &str = "SRV_PARAM_CH_TRAP_TRISE";
/// Trapezoid flat top in ns (`SRV_PARAM_CH_TRAP_TFLAT`).
pub const CH_TRAP_TFLAT: &str = "SRV_PARAM_CH_TRAP_TFLAT";
/// Trapezoid peaking position in percent (`SRV_PARAM_CH_TRAP_PEAKING`).
pub const CH_TRAP_PEAKING: &str = "SRV_PARAM_CH_TRAP_PEAKING";
/// Input dynamic range (`SRV_PARAM_CH_INDYN`).
pub const CH_INDYN: &str = "SRV_PARAM_CH_INDYN";
/// Long gate in ns (`SRV_PARAM_CH_GATE`).
pub const CH_GATE: &str = "SRV_PARAM_CH_GATE";
/// Short gate in ns (`SRV_PARAM_CH_GATESHORT`).
pub const CH_GATESHORT: &str = "SRV_PARAM_CH_GATESHORT";
/// Pre-gate in ns (`SRV_PARAM_CH_GATEPRE`).
pub const CH_GATEPRE: &str = "SRV_PARAM_CH_GATEPRE";
/// Discriminator mode (`SRV_PARAM_CH_DISCR_MODE`).
pub const CH_DISCR_MODE: &str = "SRV_PARAM_CH_DISCR_MODE";

/// Rows of the full telemetry report, in display order.
pub const FULL_TELEMETRY_ROWS: &[(&str, &str)] = &[
    (CH_COARSE_GAIN, "Coarse gain"),
    (CH_ENERGY_FINE_GAIN, "Fine gain"),
    (CH_PRETRG, "Pre-trigger [ns]"),
    (CH_THRESHOLD, "Trigger threshold [ADC]"),
    (RECLEN, "Record length [ns]"),
    (CH_POLARITY, "Polarity"),
    (CH_TRAP_TRISE, "Trap rise time [ns]"),
    (CH_TRAP_TFLAT, "Trap flat top [ns]"),
    (CH_TRAP_PEAKING, "Trap peaking time [%]"),
];

/// Rows of the enabled-channels report, in display order.
pub const ENABLED_CHANNELS_ROWS: &[(&str, &str)] = &[
    (CH_INDYN, "Input dynamic range [Vpp]"),
    (CH_ENERGY_COARSE_GAIN, "Energy coarse gain [fC/LSB x Vpp]"),
    (CH_GATE, "Gate [ns]"),
    (CH_GATESHORT, "Short gate [ns]"),
    (CH_GATEPRE, "Pre-gate [ns]"),
    (CH_DISCR_MODE, "Trigger mode"),
    (CH_THRESHOLD, "Trigger threshold [ADC]"),
    (RECLEN, "Record length [ns]"),
];
