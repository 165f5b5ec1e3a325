//! GitHub Pages deploy artifact generation.
//!
//! Produces the files a generated site needs to go live on GitHub Pages:
//! an Actions workflow, a `.gitignore` when the project has none, an
//! optional `CNAME` for custom domains, and a step-by-step `DEPLOY.md`.

use camino::{Utf8Path, Utf8PathBuf};
use launcher_core::utils::now_timestamp;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Workflow location inside a project
pub const WORKFLOW_DIR: &str = ".github/workflows";
/// Workflow file name
pub const WORKFLOW_FILE: &str = "deploy.yml";
/// Deployment guide file name
pub const GUIDE_FILE: &str = "DEPLOY.md";
/// Custom domain marker, served from the site root
pub const CNAME_FILE: &str = "CNAME";

const WORKFLOW_CONTENT: &str = r#"name: Deploy to GitHub Pages

on:
  push:
    branches: [ main ]
  pull_request:
    branches: [ main ]

jobs:
  build:
    runs-on: ubuntu-latest

    steps:
    - name: Checkout
      uses: actions/checkout@v4

    - name: Setup Node.js
      uses: actions/setup-node@v4
      with:
        node-version: '22'

    - name: Setup pnpm
      uses: pnpm/action-setup@v4
      with:
        version: 9

    - name: Get pnpm store directory
      shell: bash
      run: |
        echo "STORE_PATH=$(pnpm store path --silent)" >> $GITHUB_ENV

    - name: Setup pnpm cache
      uses: actions/cache@v4
      with:
        path: ${{ env.STORE_PATH }}
        key: ${{ runner.os }}-pnpm-store-${{ hashFiles('**/pnpm-lock.yaml') }}
        restore-keys: |
          ${{ runner.os }}-pnpm-store-

    - name: Install dependencies
      run: pnpm install --frozen-lockfile

    - name: Build with Astro
      run: pnpm run build

    - name: Setup Pages
      uses: actions/configure-pages@v4

    - name: Upload artifact
      uses: actions/upload-pages-artifact@v3
      with:
        path: './dist'

    - name: Deploy to GitHub Pages
      id: deployment
      uses: actions/deploy-pages@v4

permissions:
  contents: read
  pages: write
  id-token: write

concurrency:
  group: "pages"
  cancel-in-progress: false
"#;

const GITIGNORE_CONTENT: &str = r#"# Build outputs
dist/
.output/

# Dependencies
node_modules/

# Environment variables
.env
.env.local
.env.production

# Logs
npm-debug.log*
yarn-debug.log*
yarn-error.log*
pnpm-debug.log*

# Coverage
coverage/
*.lcov
.nyc_output

# Caches
.npm
.eslintcache
.cache
.parcel-cache

# Output of 'npm pack'
*.tgz

# Yarn Integrity file
.yarn-integrity

# MacOS
.DS_Store

# Astro specific
.astro/

# IDE
.vscode/
.idea/
*.swp
*.swo
*~
"#;

/// Switches for deploy artifact generation
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    /// Do not create the GitHub Actions workflow
    pub skip_workflow: bool,
    /// Custom domain written to `public/CNAME`
    pub custom_domain: Option<String>,
    /// Overwrite an existing workflow file
    pub force: bool,
}

/// What a deploy generation run did
#[derive(Debug, Clone, Default)]
pub struct DeployReport {
    pub written: Vec<Utf8PathBuf>,
    pub skipped: Vec<Utf8PathBuf>,
    pub is_git_repo: bool,
}

/// Generate deploy artifacts inside `project_dir`.
///
/// Existing `.gitignore` and `DEPLOY.md` files are never touched. An
/// existing workflow is only replaced when `options.force` is set. A
/// missing `.git` directory is reported, not treated as an error.
pub fn generate_deploy_artifacts(
    project_dir: &Utf8Path,
    project_name: &str,
    options: &DeployOptions,
) -> Result<DeployReport> {
    if !project_dir.is_dir() {
        return Err(Error::ProjectDirNotFound {
            path: project_dir.to_string(),
        });
    }

    let is_git_repo = project_dir.join(".git").is_dir();
    if !is_git_repo {
        warn!(
            "Project at {} is not a git repository yet; DEPLOY.md covers initialization",
            project_dir
        );
    }

    let mut report = DeployReport {
        is_git_repo,
        ..Default::default()
    };

    write_if_absent(
        project_dir.join(".gitignore"),
        GITIGNORE_CONTENT,
        &mut report,
    )?;

    if options.skip_workflow {
        debug!("Skipping GitHub Actions workflow creation");
    } else {
        write_workflow(project_dir, options.force, &mut report)?;
    }

    if let Some(domain) = &options.custom_domain {
        write_cname(project_dir, domain, &mut report)?;
    }

    let guide = render_deploy_guide(project_name, options, is_git_repo);
    write_if_absent(project_dir.join(GUIDE_FILE), &guide, &mut report)?;

    Ok(report)
}

fn write_workflow(project_dir: &Utf8Path, force: bool, report: &mut DeployReport) -> Result<()> {
    let workflow_dir = project_dir.join(WORKFLOW_DIR);
    let workflow_file = workflow_dir.join(WORKFLOW_FILE);

    if workflow_file.exists() && !force {
        debug!("Workflow file already exists at {}", workflow_file);
        report.skipped.push(workflow_file);
        return Ok(());
    }

    std::fs::create_dir_all(&workflow_dir)?;
    std::fs::write(&workflow_file, WORKFLOW_CONTENT)?;
    report.written.push(workflow_file);
    Ok(())
}

fn write_cname(project_dir: &Utf8Path, domain: &str, report: &mut DeployReport) -> Result<()> {
    let public_dir = project_dir.join("public");
    std::fs::create_dir_all(&public_dir)?;
    let cname_file = public_dir.join(CNAME_FILE);
    std::fs::write(&cname_file, domain)?;
    report.written.push(cname_file);
    Ok(())
}

fn write_if_absent(
    path: Utf8PathBuf,
    contents: &str,
    report: &mut DeployReport,
) -> Result<()> {
    if path.exists() {
        debug!("{} already exists, leaving it alone", path);
        report.skipped.push(path);
        return Ok(());
    }
    std::fs::write(&path, contents)?;
    report.written.push(path);
    Ok(())
}

fn render_deploy_guide(project_name: &str, options: &DeployOptions, is_git_repo: bool) -> String {
    let mut guide = String::new();

    guide.push_str(&format!(
        "# Deploy Guide - {project_name}\n\n\
         This guide walks you through deploying **{project_name}** to GitHub Pages.\n\n\
         ## Before you deploy\n\n"
    ));

    if options.skip_workflow {
        guide.push_str("- [ ] GitHub Actions workflow must be created manually\n");
    } else {
        guide.push_str("- [x] GitHub Actions workflow generated (`.github/workflows/deploy.yml`)\n");
    }
    match &options.custom_domain {
        Some(domain) => {
            guide.push_str(&format!("- [x] Custom domain configured: `{domain}`\n"))
        }
        None => guide.push_str("- [ ] Using the default GitHub Pages domain\n"),
    }

    guide.push_str(&format!(
        "\nVerify the project builds before pushing:\n\n\
         ```bash\n\
         cd {project_name}\n\
         pnpm install\n\
         pnpm run build\n\
         ```\n\n\
         A successful build creates the `dist/` directory.\n\n\
         ## GitHub repository setup\n\n\
         1. Create a new repository on GitHub named `{project_name}` (public, no README)\n\
         2. Run the following in this project directory:\n\n\
         ```bash\n"
    ));

    if is_git_repo {
        guide.push_str(
            "git add .\n\
             git commit -m \"Add deployment configuration\"\n",
        );
    } else {
        guide.push_str(
            "git init\n\
             git add .\n\
             git commit -m \"Initial commit\"\n\
             git branch -M main\n",
        );
    }
    guide.push_str(&format!(
        "git remote add origin https://github.com/YOUR_USERNAME/{project_name}.git\n\
         git push -u origin main\n\
         ```\n\n\
         ## GitHub Pages configuration\n\n\
         1. Open the repository settings and select **Pages**\n\
         2. Under **Source**, choose **GitHub Actions**\n"
    ));

    match &options.custom_domain {
        Some(domain) => guide.push_str(&format!(
            "3. Add a `CNAME` DNS record at your domain provider pointing to `YOUR_USERNAME.github.io`\n\
             4. Enter `{domain}` under **Custom domain** and enable **Enforce HTTPS**\n\n"
        )),
        None => guide.push_str(&format!(
            "\nOnce deployed, the site is served at:\n\
             `https://YOUR_USERNAME.github.io/{project_name}`\n\n"
        )),
    }

    if options.skip_workflow {
        guide.push_str(&format!(
            "## Manual workflow setup\n\n\
             The automatic workflow was skipped. Create `.github/workflows/deploy.yml` with a\n\
             standard Astro + GitHub Pages workflow, or re-run `astro-launcher deploy {project_name}`\n\
             without `--skip-workflow`.\n\n"
        ));
    } else {
        guide.push_str(
            "## Automatic deployment\n\n\
             Every push to `main` triggers the workflow: it installs Node.js 22 and pnpm 9,\n\
             builds the site with `pnpm run build`, and publishes `dist/` to GitHub Pages.\n\
             Check progress under the repository's **Actions** tab; a full run takes a few\n\
             minutes.\n\n",
        );
    }

    guide.push_str(
        "## Troubleshooting\n\n\
         - **404 after deploy**: check the `base` setting in `astro.config.mjs` against the\n\
           repository name\n\
         - **Broken styles**: make sure asset paths are relative or use the configured base\n\
         - **Workflow failure**: open the Actions log; missing dependencies in `package.json`\n\
           are the usual cause\n\n\
         ## Updating the site\n\n\
         Commit and push to `main`; the workflow redeploys automatically.\n\n\
         ---\n\n",
    );
    guide.push_str(&format!(
        "Generated by astro-launcher v{} on {}\n",
        env!("CARGO_PKG_VERSION"),
        now_timestamp()
    ));

    guide
}
