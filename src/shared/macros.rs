/***************************************/
/*               Macros                */
/***************************************/

// Logs the error and terminates with exit code 1. Only for the binary boundary.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    };
}
