use crate::areas::database::Database;
use crate::areas::remote::{OBJECTS_DIR, STATE_FILE};
use crate::areas::snapshots::SnapshotStore;
use crate::areas::state::{RepositoryState, StateFile};
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::hash_content;
use crate::artifacts::objects::object::frame;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::config::Config;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub const TWIG_DIR: &str = ".twig";
pub const STAGING_DIR: &str = "staging";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    snapshots: SnapshotStore,
    state_file: StateFile,
    config: Config,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>, config: Config) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let twig_path = path.join(TWIG_DIR);

        Ok(Repository {
            writer: RefCell::new(writer),
            database: Database::new(twig_path.join(OBJECTS_DIR).into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            snapshots: SnapshotStore::new(twig_path.join(STAGING_DIR).into_boxed_path()),
            state_file: StateFile::new(twig_path.join(STATE_FILE).into_boxed_path()),
            path: path.into_boxed_path(),
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn twig_path(&self) -> Box<Path> {
        self.path.join(TWIG_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    pub fn state_file(&self) -> &StateFile {
        &self.state_file
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn load_state(&self) -> anyhow::Result<RepositoryState> {
        self.state_file.load()
    }

    pub fn store_state(&self, state: &RepositoryState) -> anyhow::Result<()> {
        self.state_file.store(state)
    }

    pub fn head_commit(&self, state: &RepositoryState) -> anyhow::Result<Commit> {
        self.database.get_commit(state.head())
    }

    /// Content hash a working file would get as a blob, without storing it
    pub fn working_file_oid(&self, name: &str) -> anyhow::Result<ObjectId> {
        let content = self.workspace.read(name)?;
        hash_content(&frame(ObjectType::Blob, &content))
    }

    /// Snapshot `content` and stage it as the next version of `name`
    pub fn stage_addition(
        &self,
        state: &mut RepositoryState,
        name: &str,
        content: &[u8],
    ) -> anyhow::Result<()> {
        self.snapshots.save(name, content)?;
        state.staging_mut().stage_addition(name);
        Ok(())
    }

    pub fn stage_removal(&self, state: &mut RepositoryState, name: &str) -> anyhow::Result<()> {
        self.snapshots.remove(name)?;
        state.staging_mut().stage_removal(name);
        Ok(())
    }

    pub fn cancel_addition(&self, state: &mut RepositoryState, name: &str) -> anyhow::Result<()> {
        if state.staging_mut().cancel_addition(name) {
            self.snapshots.remove(name)?;
        }
        Ok(())
    }

    pub fn clear_staging(&self, state: &mut RepositoryState) -> anyhow::Result<()> {
        self.snapshots.clear()?;
        state.staging_mut().clear();
        Ok(())
    }
}
