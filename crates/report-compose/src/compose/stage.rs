//! Document outline state machine

use std::fmt;

use crate::spec::ReportSpec;

/// Composition stages in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Cover,
    CompanySet,
    SectionSet,
    Map,
    ProjectSet,
    Org,
    Team,
    Appendix,
    End,
    Done,
}

/// Which optional stages run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageFlags {
    pub map: bool,
    pub org: bool,
    pub team: bool,
    pub appendix: bool,
}

impl StageFlags {
    pub fn from_spec(spec: &ReportSpec) -> Self {
        Self {
            map: spec.add_map,
            org: spec.add_org,
            team: spec.add_team,
            appendix: spec.add_appendix,
        }
    }
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Cover => "cover",
            Stage::CompanySet => "company",
            Stage::SectionSet => "sections",
            Stage::Map => "map",
            Stage::ProjectSet => "projects",
            Stage::Org => "org chart",
            Stage::Team => "team",
            Stage::Appendix => "appendix",
            Stage::End => "end",
            Stage::Done => "done",
        }
    }

    /// The following stage in the fixed outline, ignoring flags
    fn successor(self) -> Stage {
        match self {
            Stage::Cover => Stage::CompanySet,
            Stage::CompanySet => Stage::SectionSet,
            Stage::SectionSet => Stage::Map,
            Stage::Map => Stage::ProjectSet,
            Stage::ProjectSet => Stage::Org,
            Stage::Org => Stage::Team,
            Stage::Team => Stage::Appendix,
            Stage::Appendix => Stage::End,
            Stage::End | Stage::Done => Stage::Done,
        }
    }

    pub fn is_enabled(self, flags: StageFlags) -> bool {
        match self {
            Stage::Map => flags.map,
            Stage::Org => flags.org,
            Stage::Team => flags.team,
            Stage::Appendix => flags.appendix,
            _ => true,
        }
    }

    /// The next stage that runs under `flags`
    pub fn next(self, flags: StageFlags) -> Stage {
        let mut stage = self.successor();
        while !stage.is_enabled(flags) {
            stage = stage.successor();
        }
        stage
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stages that run under `flags`, in order, excluding [`Stage::Done`]
pub fn stage_plan(flags: StageFlags) -> Vec<Stage> {
    let mut plan = Vec::new();
    let mut stage = Stage::Cover;
    while stage != Stage::Done {
        plan.push(stage);
        stage = stage.next(flags);
    }
    plan
}

/// Number of progress notifications a build of `spec` emits, saving included
pub fn total_steps(spec: &ReportSpec) -> usize {
    let sections = spec.sections.len();
    let projects = spec.selected_projects().len();

    let composed: usize = stage_plan(StageFlags::from_spec(spec))
        .into_iter()
        .map(|stage| match stage {
            Stage::SectionSet => sections,
            Stage::ProjectSet => projects,
            _ => 1,
        })
        .sum();

    composed + 1
}
