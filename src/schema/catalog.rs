//! The archive's table catalog.
//!
//! This is the configuration data the rest of the crate is parameterized
//! over: the tables of the observation database, their join dependencies and
//! the literal join conditions. The model is constructed explicitly and
//! passed by reference into the query builders - process bootstrap owns the
//! single shared instance.

use super::{DatabaseModel, SchemaResult, TableNode};

/// Build the observation archive schema graph.
pub fn observation_model() -> SchemaResult<DatabaseModel> {
    DatabaseModel::new(vec![
        TableNode::root("Observation"),
        TableNode::new(
            "Proposal",
            ["Observation"],
            "Proposal.proposalId=Observation.proposalId",
        ),
        TableNode::new(
            "Telescope",
            ["Observation"],
            "Telescope.telescopeId=Observation.telescopeId",
        ),
        TableNode::new(
            "ObservationStatus",
            ["Observation"],
            "ObservationStatus.observationStatusId=Observation.observationStatusId",
        ),
        TableNode::new(
            "Target",
            ["Observation"],
            "Target.observationId=Observation.observationId",
        ),
        TableNode::new(
            "TargetType",
            ["Target"],
            "TargetType.targetTypeId=Target.targetTypeId",
        ),
        TableNode::new(
            "DataFile",
            ["Observation"],
            "DataFile.observationId=Observation.observationId",
        ),
        TableNode::new(
            "DataCategory",
            ["DataFile"],
            "DataCategory.dataCategoryId=DataFile.dataCategoryId",
        ),
        TableNode::new(
            "DataPreview",
            ["DataFile"],
            "DataPreview.dataFileId=DataFile.dataFileId",
        ),
        TableNode::new(
            "Instrument",
            ["Observation", "Telescope"],
            "Instrument.instrumentId=Observation.instrumentId AND Instrument.telescopeId=Telescope.telescopeId",
        ),
    ])
}
