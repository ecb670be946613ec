//! Space operations for MockHerokuClient
//!
//! Spaces may be addressed by id or by name, as on the Platform API.

use super::{MockHerokuClient, MockOperation};
use crate::error::HerokuError;
use crate::models::*;

fn find_id(client: &MockHerokuClient, id_or_name: &str) -> Option<String> {
    let spaces = client.spaces.lock().unwrap();
    if spaces.contains_key(id_or_name) {
        return Some(id_or_name.to_string());
    }
    spaces
        .values()
        .find(|s| s.name == id_or_name)
        .map(|s| s.id.clone())
}

fn not_found(id: &str) -> HerokuError {
    HerokuError::NotFound(format!("Space {} not found", id))
}

pub async fn create_space(client: &MockHerokuClient, name: &str, organization: &str, region: &str, shield: bool) -> Result<Space, HerokuError> {
        client.record(MockOperation::CreateSpace, name)?;

        if find_id(client, name).is_some() {
            return Err(HerokuError::Api {
                status: 422,
                id: Some("invalid_params".to_string()),
                message: format!("Name {} is already taken", name),
            });
        }

        let id = uuid::Uuid::new_v4().to_string();
        let space = client.helpers().create_space(&id, name, organization, region, shield, SpaceState::Allocating);

        client.spaces.lock().unwrap().insert(id, space.clone());
        Ok(space)
}

pub async fn get_space(client: &MockHerokuClient, id: &str) -> Result<Space, HerokuError> {
        client.record(MockOperation::GetSpace, id)?;
        let key = find_id(client, id).ok_or_else(|| not_found(id))?;
        client.spaces
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| not_found(id))
}

pub async fn update_space(client: &MockHerokuClient, id: &str, name: &str) -> Result<Space, HerokuError> {
        client.record(MockOperation::UpdateSpace, id)?;
        let key = find_id(client, id).ok_or_else(|| not_found(id))?;

        if find_id(client, name).is_some_and(|other| other != key) {
            return Err(HerokuError::Api {
                status: 422,
                id: Some("invalid_params".to_string()),
                message: format!("Name {} is already taken", name),
            });
        }

        let mut spaces = client.spaces.lock().unwrap();
        let space = spaces.get_mut(&key).ok_or_else(|| not_found(id))?;
        space.name = name.to_string();
        space.updated_at = Some(chrono::Utc::now());
        Ok(space.clone())
}

pub async fn delete_space(client: &MockHerokuClient, id: &str) -> Result<Space, HerokuError> {
        client.record(MockOperation::DeleteSpace, id)?;
        let key = find_id(client, id).ok_or_else(|| not_found(id))?;

        client.nat_sources.lock().unwrap().remove(&key);
        let mut space = client.spaces
            .lock()
            .unwrap()
            .remove(&key)
            .ok_or_else(|| not_found(id))?;
        space.state = SpaceState::Deleting;
        Ok(space)
}

pub async fn get_space_nat(client: &MockHerokuClient, id: &str) -> Result<SpaceNat, HerokuError> {
        client.record(MockOperation::GetSpaceNat, id)?;
        let key = find_id(client, id).ok_or_else(|| not_found(id))?;

        let state = client.spaces
            .lock()
            .unwrap()
            .get(&key)
            .map(|s| s.state)
            .ok_or_else(|| not_found(id))?;
        if state != SpaceState::Allocated {
            return Err(HerokuError::Api {
                status: 422,
                id: Some("invalid_params".to_string()),
                message: format!("Space {} is {}, NAT is not available yet", id, state),
            });
        }

        let sources = client.nat_sources
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default();
        let now = chrono::Utc::now();
        Ok(SpaceNat {
            sources,
            state: Some(NatState::Enabled),
            created_at: Some(now),
            updated_at: Some(now),
        })
}
