pub(crate) mod create;
pub(crate) mod define;
pub(crate) mod live;
pub(crate) mod select;

pub use self::create::CreateStatement;
pub use self::define::{
	DefineEventStatement, DefineFieldStatement, DefineIndexStatement, DefineStatement,
	DefineTableStatement,
};
pub use self::live::LiveStatement;
pub use self::select::SelectStatement;
