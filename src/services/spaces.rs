use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    models::space::{NewSpace, Space, SpaceFilter, SpacePatch},
    policy::{self, Action, Actor, Resource},
    AppState,
};

pub struct SpaceService {
    state: Arc<AppState>,
}

impl SpaceService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn list(&self, filter: &SpaceFilter) -> AppResult<Vec<Space>> {
        self.state.spaces.list(filter).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Space> {
        self.state
            .spaces
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Space"))
    }

    pub async fn create(&self, actor: &Actor, space: NewSpace) -> AppResult<Space> {
        policy::authorize(actor, Action::Create, &Resource::Spaces)?;

        let space = self.state.spaces.create(actor.id, space).await?;
        info!(space_id = space.id, host_id = actor.id, "Space created");
        Ok(space)
    }

    pub async fn update(&self, actor: &Actor, id: i64, patch: SpacePatch) -> AppResult<Space> {
        let mut space = self.get(id).await?;
        policy::authorize(actor, Action::Update, &Resource::Space(&space)).inspect_err(|_| {
            warn!(space_id = id, user_id = actor.id, "Space update denied");
        })?;

        patch.apply(&mut space);
        let space = self
            .state
            .spaces
            .update(&space)
            .await?
            .ok_or_else(|| AppError::not_found("Space"))?;

        info!(space_id = id, "Space updated");
        Ok(space)
    }

    pub async fn delete(&self, actor: &Actor, id: i64) -> AppResult<()> {
        let space = self.get(id).await?;
        policy::authorize(actor, Action::Delete, &Resource::Space(&space)).inspect_err(|_| {
            warn!(space_id = id, user_id = actor.id, "Space delete denied");
        })?;

        if !self.state.spaces.delete(id).await? {
            return Err(AppError::not_found("Space"));
        }
        info!(space_id = id, "Space deleted");
        Ok(())
    }
}
