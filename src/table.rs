use std::{fmt, marker::PhantomData};

use smol_str::{SmolStr, format_smolstr};

use crate::writer::{self, FormatContext, FormatWriter};

/// A model stored in a table named by its entity.
pub trait TableSchema {
    fn entity() -> &'static str;
}

/// Naming for the table behind `M`, aliased as `_<entity>_`.
pub struct Table<M>(PhantomData<fn() -> M>);

impl<M: TableSchema> Table<M> {
    pub fn name() -> &'static str {
        M::entity()
    }

    pub fn alias() -> SmolStr {
        format_smolstr!("_{}_", M::entity().to_lowercase())
    }

    /// `"entity" as "_entity_"`, for a from or join clause.
    pub fn query() -> String {
        writer::render_to_string(&Table::<M>(PhantomData))
    }
}

impl<M: TableSchema> FormatWriter for Table<M> {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.write_ident(Self::name())?;
        context.write_alias(&Self::alias())
    }
}

impl<M> fmt::Debug for Table<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Table").finish()
    }
}
