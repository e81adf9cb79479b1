// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use strum_macros::{AsRefStr, Display};

use super::paths::{InsertPoint, ParagraphPath};
use crate::dom::NodeId;
use crate::format::EntityInfoFormat;
use crate::model::{ContentModelDocument, Segment, SegmentKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
pub enum DeleteResult {
    /// Nothing was removed yet, later steps may act.
    NotDeleted,
    /// One character or one inline element next to a collapsed selection
    /// was removed.
    SingleChar,
    /// Selected content was removed or a block was split or restructured.
    Range,
    /// The selection is at a boundary that cannot be deleted across.
    NothingToDelete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
pub enum EntityOperation {
    NewEntity,
    ReplaceTemporaryContent,
    UpdateEntityState,
    RemoveFromStart,
    RemoveFromEnd,
    Overwrite,
}

/// An entity dropped from the model by an edit. The host decides what to do
/// with its wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletedEntity {
    pub wrapper: NodeId,
    pub entity_format: EntityInfoFormat,
    pub operation: EntityOperation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
pub enum KnownAnnounceStrings {
    AnnounceListItemNumbering,
    AnnounceListItemBullet,
}

/// Something a screen reader should read out after the edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnounceData {
    pub default_strings: Option<KnownAnnounceStrings>,
    pub format_strings: Vec<String>,
    pub text: Option<String>,
}

/// Side effects of an edit that the host reacts to after the model was
/// written back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatContentModelContext {
    pub announce_data: Option<AnnounceData>,
    pub deleted_entities: Vec<DeletedEntity>,
}

/// State shared by the steps of one edit.
pub struct DeleteSelectionContext<'a> {
    pub model: &'a mut ContentModelDocument,
    pub delete_result: DeleteResult,
    pub insert_point: Option<InsertPoint>,
    /// The paragraph that should hold the cursor once the edit is done.
    pub last_paragraph: Option<ParagraphPath>,
    pub format_context: Option<&'a mut FormatContentModelContext>,
}

impl<'a> DeleteSelectionContext<'a> {
    pub fn new(
        model: &'a mut ContentModelDocument,
        format_context: Option<&'a mut FormatContentModelContext>,
    ) -> Self {
        Self {
            model,
            delete_result: DeleteResult::NotDeleted,
            insert_point: None,
            last_paragraph: None,
            format_context,
        }
    }

    /// Continue editing after a [super::delete_selection] call.
    pub fn from_result(
        model: &'a mut ContentModelDocument,
        result: DeleteSelectionResult,
        format_context: Option<&'a mut FormatContentModelContext>,
    ) -> Self {
        let mut context = Self::new(model, format_context);
        context.delete_result = result.delete_result;
        context.last_paragraph =
            result.insert_point.as_ref().map(|ip| ip.paragraph.clone());
        context.insert_point = result.insert_point;
        context
    }

    /// Move the insert point, and the cursor with it.
    pub fn set_insert_point(&mut self, insert_point: InsertPoint) {
        self.last_paragraph = Some(insert_point.paragraph.clone());
        self.insert_point = Some(insert_point);
    }

    /// Report an entity whose segment was just removed.
    pub fn record_deleted_segment(&mut self, segment: &Segment, operation: EntityOperation) {
        if let SegmentKind::Entity {
            wrapper,
            entity_format,
        } = &segment.kind
        {
            self.record_deleted_entity(*wrapper, entity_format, operation);
        }
    }

    pub fn record_deleted_entity(
        &mut self,
        wrapper: NodeId,
        entity_format: &EntityInfoFormat,
        operation: EntityOperation,
    ) {
        if let Some(format_context) = self.format_context.as_deref_mut() {
            format_context.deleted_entities.push(DeletedEntity {
                wrapper,
                entity_format: entity_format.clone(),
                operation,
            });
        }
    }

    pub fn announce(&mut self, announce_data: AnnounceData) {
        if let Some(format_context) = self.format_context.as_deref_mut() {
            format_context.announce_data = Some(announce_data);
        }
    }

    pub fn into_result(self) -> DeleteSelectionResult {
        DeleteSelectionResult {
            delete_result: self.delete_result,
            insert_point: self.insert_point,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteSelectionResult {
    pub delete_result: DeleteResult,
    pub insert_point: Option<InsertPoint>,
}

pub type EditStepCallback = fn(&mut DeleteSelectionContext<'_>);
pub type EditStepGuard = fn(&DeleteSelectionContext<'_>) -> bool;

/// One step of an edit. Without a guard a step only runs while nothing has
/// been deleted yet.
#[derive(Clone, Copy)]
pub struct EditStep {
    pub name: &'static str,
    pub should_run: Option<EditStepGuard>,
    pub callback: EditStepCallback,
}

impl EditStep {
    pub const fn new(name: &'static str, callback: EditStepCallback) -> Self {
        Self {
            name,
            should_run: None,
            callback,
        }
    }

    pub const fn guarded(
        name: &'static str,
        should_run: EditStepGuard,
        callback: EditStepCallback,
    ) -> Self {
        Self {
            name,
            should_run: Some(should_run),
            callback,
        }
    }

    pub fn should_run(&self, context: &DeleteSelectionContext<'_>) -> bool {
        match self.should_run {
            Some(guard) => guard(context),
            None => context.delete_result == DeleteResult::NotDeleted,
        }
    }
}

impl std::fmt::Debug for EditStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditStep")
            .field("name", &self.name)
            .field("guarded", &self.should_run.is_some())
            .finish()
    }
}

/// Run `steps` in order. An edit without an insert point has nowhere to
/// happen, so the run stops as soon as there is none.
pub fn run_edit_steps(steps: &[EditStep], context: &mut DeleteSelectionContext<'_>) {
    for step in steps {
        if context.insert_point.is_none() {
            tracing::trace!(step = step.name, "no insert point, edit stopped");
            break;
        }
        if step.should_run(context) {
            (step.callback)(context);
            tracing::trace!(
                step = step.name,
                result = %context.delete_result,
                "edit step done"
            );
        }
    }
}
