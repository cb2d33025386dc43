//! Standalone and fallback resolution against real on-disk layouts.

mod common;

use buildenv_core::paths::normalize;
use buildenv_core::{
    BuildEnvironmentMode, CandidateSource, FixedEnv, FixedHost, HostFlavor, Probes, resolve,
};
use common::{DLL, EXE, StandaloneLayout, profile, touch};

fn probes() -> Probes {
    Probes::empty().with_profile(profile())
}

#[test]
fn finds_tool_by_environment_variable() {
    let layout = StandaloneLayout::new(EXE);
    let probes = probes().with_env(FixedEnv::new().with_var("MSBUILD_EXE_PATH", &layout.exe));

    let env = resolve(&probes);

    assert_eq!(env.mode(), BuildEnvironmentMode::Standalone);
    assert_eq!(env.current_tool_exe_path(), normalize(&layout.exe));
    assert_eq!(env.current_tool_directory(), normalize(&layout.build_dir));
    assert_eq!(env.source(), Some(CandidateSource::EnvironmentVariable));
    assert!(env.ide_install_root().is_none());
}

#[test]
fn finds_tool_from_command_line() {
    let layout = StandaloneLayout::new(EXE);
    let probes = probes().with_host(FixedHost::new().with_entry_process(&layout.exe));

    let env = resolve(&probes);

    assert_eq!(env.mode(), BuildEnvironmentMode::Standalone);
    assert_eq!(env.current_tool_exe_path(), normalize(&layout.exe));
    assert_eq!(
        env.current_tool_config_file(),
        normalize(&layout.build_dir.join("MSBuild.exe.config"))
    );
}

#[test]
fn finds_tool_from_running_process() {
    let layout = StandaloneLayout::new(EXE);
    let probes = probes().with_host(FixedHost::new().with_executing_image(&layout.exe));

    let env = resolve(&probes);

    assert_eq!(env.mode(), BuildEnvironmentMode::Standalone);
    assert_eq!(env.source(), Some(CandidateSource::ProcessImage));
    assert_eq!(env.tools_directory32(), normalize(&layout.build_dir));
}

#[test]
fn finds_managed_entry_point_beside_hosting_image() {
    let layout = StandaloneLayout::new(DLL);
    let host_image = layout.build_dir.join("Microsoft.Build.dll");
    touch(&host_image);
    let probes = probes().with_host(FixedHost::new().with_executing_image(&host_image));

    let env = resolve(&probes);

    assert_eq!(env.mode(), BuildEnvironmentMode::Standalone);
    assert_eq!(env.current_tool_exe_path(), normalize(&layout.exe));
    assert_eq!(env.source(), Some(CandidateSource::ProcessImage));
}

#[test]
fn finds_tool_from_base_directory() {
    let layout = StandaloneLayout::new(EXE);
    let probes = probes().with_host(FixedHost::new().with_base_directory(&layout.build_dir));

    let env = resolve(&probes);

    assert_eq!(env.mode(), BuildEnvironmentMode::Standalone);
    assert_eq!(env.current_tool_exe_path(), normalize(&layout.exe));
    assert_eq!(env.source(), Some(CandidateSource::BaseDirectory));
}

#[test]
fn base_directory_prefers_compiled_flavor() {
    let layout = StandaloneLayout::new(EXE);
    touch(&layout.build_dir.join(DLL));
    let probes = Probes::empty()
        .with_profile(profile().with_flavor(HostFlavor::Managed))
        .with_host(FixedHost::new().with_base_directory(&layout.build_dir));

    let env = resolve(&probes);

    assert_eq!(env.current_tool_exe_path(), normalize(&layout.build_dir.join(DLL)));
}

#[test]
fn finds_amd64_sibling_without_ide() {
    let layout = StandaloneLayout::with_amd64(EXE);
    let probes = probes().with_host(FixedHost::new().with_entry_process(&layout.exe));

    let env = resolve(&probes);

    assert_eq!(env.mode(), BuildEnvironmentMode::Standalone);
    assert_eq!(env.tools_directory32(), normalize(&layout.build_dir));
    assert_eq!(env.tools_directory64(), normalize(&layout.amd64_dir()));
}

#[test]
fn finds_32_bit_parent_when_running_in_amd64_without_ide() {
    let layout = StandaloneLayout::with_amd64(EXE);
    let exe64 = layout.amd64_dir().join(EXE);
    let probes = probes().with_host(FixedHost::new().with_entry_process(&exe64));

    let env = resolve(&probes);

    assert_eq!(env.mode(), BuildEnvironmentMode::Standalone);
    assert_eq!(env.current_tool_exe_path(), normalize(&exe64));
    assert_eq!(env.tools_directory32(), normalize(&layout.build_dir));
    assert_eq!(env.tools_directory64(), normalize(&layout.amd64_dir()));
}

#[test]
fn tool_directories_match_without_amd64() {
    let layout = StandaloneLayout::new(EXE);
    let probes = probes().with_host(FixedHost::new().with_entry_process(&layout.exe));

    let env = resolve(&probes);

    assert_eq!(env.tools_directory32(), env.tools_directory64());
    assert_eq!(env.extensions_path(), env.tools_directory32());
}

#[test]
fn none_when_tool_is_not_available() {
    let layout = StandaloneLayout::empty();
    let missing = layout.build_dir.join(EXE);
    let probes = probes().with_host(FixedHost::new().with_entry_process(&missing));

    let env = resolve(&probes);

    assert_eq!(env.mode(), BuildEnvironmentMode::None);
    assert_eq!(env.current_tool_exe_path(), normalize(&missing));
    assert_eq!(env.current_tool_directory(), normalize(&layout.build_dir));
    assert!(env.ide_install_root().is_none());
    assert_eq!(env.source(), None);
}

#[test]
fn none_defaults_to_base_directory() {
    let layout = StandaloneLayout::empty();
    let probes = probes().with_host(FixedHost::new().with_base_directory(&layout.build_dir));

    let env = resolve(&probes);

    assert_eq!(env.mode(), BuildEnvironmentMode::None);
    assert_eq!(env.tools_directory32(), normalize(&layout.build_dir));
    assert_eq!(env.tools_directory64(), normalize(&layout.build_dir));
}

#[test]
fn detects_test_runner_host() {
    let layout = StandaloneLayout::new(EXE);
    let runner = layout.root.join("xunit.console.x86.exe");
    let probes = probes()
        .with_env(FixedEnv::new().with_var("MSBUILD_EXE_PATH", &layout.exe))
        .with_host(FixedHost::new().with_entry_process(&runner));

    let env = resolve(&probes);

    assert!(env.running_tests());
    assert_eq!(env.mode(), BuildEnvironmentMode::Standalone);
}
