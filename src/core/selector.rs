use crate::{
    core::record::VcfRecord, error::TidyVcfError, io::sites_reader::SiteAllowList,
    utils::util::Result,
};

/// Last observed record, used for spacing decisions in thinning mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThinCursor {
    pub previous_chrom: String,
    pub previous_pos: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SiteSelector {
    /// Every record passes.
    All,
    /// A record passes iff its `(CHROM, POS)` text is listed.
    AllowList(SiteAllowList),
    /// A record passes when it starts a new chromosome or lies more than `min_distance`
    /// bases past the previously observed record.
    Thin {
        min_distance: u64,
        cursor: ThinCursor,
    },
}

impl SiteSelector {
    /// Validates that at most one selection mode is configured.
    pub fn from_config(sites: Option<SiteAllowList>, thin: Option<u64>) -> Result<Self> {
        match (sites, thin) {
            (Some(_), Some(_)) => Err(TidyVcfError::ConflictingSelection),
            (Some(allow_list), None) => Ok(Self::AllowList(allow_list)),
            (None, Some(0)) => Err(TidyVcfError::InvalidThin { value: 0 }),
            (None, Some(min_distance)) => Ok(Self::thin(min_distance)),
            (None, None) => Ok(Self::All),
        }
    }

    pub fn thin(min_distance: u64) -> Self {
        Self::Thin {
            min_distance,
            cursor: ThinCursor::default(),
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::AllowList(_) => "sites",
            Self::Thin { .. } => "thin",
        }
    }

    /// Decides whether `record` is emitted. Must be called exactly once per record, in input
    /// order: in thinning mode the cursor moves to every observed record, whether it passed
    /// or not, so spacing is measured from the last record seen rather than the last kept.
    pub fn passes(&mut self, record: &VcfRecord) -> Result<bool> {
        match self {
            Self::All => Ok(true),
            Self::AllowList(allow_list) => Ok(allow_list.contains(record.chrom, record.pos)),
            Self::Thin {
                min_distance,
                cursor,
            } => {
                let pos = record.position()?;
                let passing = if record.chrom != cursor.previous_chrom {
                    true
                } else {
                    pos.checked_sub(cursor.previous_pos)
                        .is_some_and(|distance| distance > *min_distance)
                };
                if record.chrom != cursor.previous_chrom {
                    cursor.previous_chrom.clear();
                    cursor.previous_chrom.push_str(record.chrom);
                }
                cursor.previous_pos = pos;
                Ok(passing)
            }
        }
    }
}
