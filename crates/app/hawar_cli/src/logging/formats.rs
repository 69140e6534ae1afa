use flexi_logger::DeferredNow;
use log::Record;

/// `LEVEL [target] message`, kept short for terminal use.
pub fn cli_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{:<5} [{}] {}",
        record.level(),
        record.target(),
        record.args()
    )
}
